//! Shared eight-order fixture for unit tests.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::analyzer::SalesAnalyzer;
use crate::loader::load_from_reader;
use crate::types::SalesRecord;

pub const HEADER: &str = "order_id,date,product,category,price,quantity,region,customer_id,salesperson";

pub const SAMPLE_CSV: &str = "\
order_id,date,product,category,price,quantity,region,customer_id,salesperson
1001,2024-01-15,Laptop,Electronics,1200.00,2,North,C001,SP001
1002,2024-01-16,Mouse,Electronics,25.50,5,South,C002,SP002
1003,2024-01-16,Desk Chair,Furniture,350.00,1,East,C003,SP001
1004,2024-01-17,Notebook,Stationery,5.00,20,West,C004,SP003
1005,2024-02-15,Monitor,Electronics,450.00,2,North,C005,SP002
1006,2024-02-16,Desk,Furniture,600.00,1,South,C006,SP001
1007,2024-02-17,Pen Set,Stationery,15.00,10,East,C007,SP003
1008,2024-03-15,Laptop,Electronics,1200.00,1,West,C001,SP002
";

pub fn sample_records() -> Vec<SalesRecord> {
    load_from_reader(SAMPLE_CSV.as_bytes()).expect("fixture parses")
}

pub fn sample_analyzer() -> SalesAnalyzer {
    SalesAnalyzer::new(sample_records())
}

pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".csv").expect("tempfile");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 0.005,
        "expected {expected}, got {actual}"
    );
}
