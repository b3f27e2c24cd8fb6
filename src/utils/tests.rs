use super::*;

fn options(use_comma: bool, locale: &str, decimal_places: usize) -> NumberFormatOptions {
    NumberFormatOptions {
        use_comma,
        locale: locale.to_string(),
        decimal_places,
    }
}

#[test]
fn test_format_number_comma() {
    let options = options(true, "en", 2);

    assert_eq!(format_number(1000u32, &options), "1,000");
    assert_eq!(format_number(1000000u64, &options), "1,000,000");
    assert_eq!(format_number(123u32, &options), "123");
}

#[test]
fn test_format_number_plain() {
    assert_eq!(format_number(1000u32, &options(false, "en", 2)), "1000");
}

#[test]
fn test_format_currency_default() {
    let options = NumberFormatOptions::default();

    assert_eq!(format_currency(5827.5, &options), "$5,827.50");
    assert_eq!(format_currency(728.4375, &options), "$728.44");
    assert_eq!(format_currency(0.0, &options), "$0.00");
    assert_eq!(format_currency(1234567.891, &options), "$1,234,567.89");
}

#[test]
fn test_format_currency_plain_and_precision() {
    assert_eq!(format_currency(5827.5, &options(false, "en", 2)), "$5827.50");
    assert_eq!(format_currency(5827.5, &options(true, "en", 0)), "$5,828");
    assert_eq!(format_currency(127.5, &options(true, "en", 3)), "$127.500");
}

#[test]
fn test_format_currency_locale_separators() {
    assert_eq!(format_currency(5827.5, &options(true, "de", 2)), "$5.827,50");
}

#[test]
fn test_format_currency_negative() {
    let options = NumberFormatOptions::default();
    assert_eq!(format_currency(-1500.25, &options), "-$1,500.25");
    assert_eq!(format_currency(-0.001, &options), "$0.00");
}
