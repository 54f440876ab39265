use std::io::Write;

use cletech::bulk::{
    check_submission, parse_bulk_csv, parse_bulk_input, quote_bulk, ParseError, PurchaseIntent,
    SubmissionBlocked, INVALID_FORMAT_MESSAGE,
};
use cletech::catalog::Product;
use cletech::Network;

fn product(network: &str, capacity: f64, price: f64) -> Product {
    Product {
        id: format!("{}-{}", network, capacity),
        network: network.to_string(),
        capacity,
        price,
        in_stock: true,
    }
}

fn intent(phone: &str, capacity: f64, network: Network) -> PurchaseIntent {
    PurchaseIntent { phone_number: phone.to_string(), capacity, network }
}

#[test]
fn test_two_valid_lines() {
    let result = parse_bulk_input("0241234567 2\n0551234567 5", Network::Mtn);
    assert!(result.errors.is_empty());
    assert_eq!(
        result.purchases,
        vec![intent("0241234567", 2.0, Network::Mtn), intent("0551234567", 5.0, Network::Mtn)]
    );
}

#[test]
fn test_invalid_phone_reports_line() {
    let result = parse_bulk_input("badnumber 2", Network::Mtn);
    assert!(result.purchases.is_empty());
    assert_eq!(
        result.errors,
        vec![ParseError { line: 1, error: "Invalid phone number: badnumber".into() }]
    );
}

#[test]
fn test_capacity_above_range() {
    let result = parse_bulk_input("0241234567 500", Network::Mtn);
    assert!(result.purchases.is_empty());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].line, 1);
    assert_eq!(result.errors[0].error, "Invalid capacity: 500");
}

#[test]
fn test_capacity_below_range_and_not_a_number() {
    let result = parse_bulk_input("0241234567 0.05\n0241234567 abc\n0241234567 0", Network::Mtn);
    assert!(result.purchases.is_empty());
    let lines: Vec<usize> = result.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert!(result.errors.iter().all(|e| e.error.starts_with("Invalid capacity")));
}

#[test]
fn test_capacity_bounds_are_inclusive() {
    let result = parse_bulk_input("0241234567 0.1\n0241234567 100", Network::Mtn);
    assert!(result.errors.is_empty());
    assert_eq!(result.purchases.len(), 2);
}

#[test]
fn test_single_token_line_is_format_error() {
    let result = parse_bulk_input("0241234567", Network::Mtn);
    assert_eq!(
        result.errors,
        vec![ParseError { line: 1, error: INVALID_FORMAT_MESSAGE.into() }]
    );
}

#[test]
fn test_separators_and_prefixes() {
    let text = "+233 241234567, 1.5\n233551234567\t3\n201234567,,10GB";
    let result = parse_bulk_input(text, Network::Telecel);
    // "+233 241234567, 1.5" splits into ["+233", "241234567", "1.5"]: the phone token is "+233"
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].line, 1);
    assert_eq!(
        result.purchases,
        vec![intent("0551234567", 3.0, Network::Telecel), intent("0201234567", 10.0, Network::Telecel)]
    );
}

#[test]
fn test_blank_lines_do_not_count() {
    let result = parse_bulk_input("\n  \n0241234567 2\n\nbad 1\n", Network::Mtn);
    assert_eq!(result.purchases.len(), 1);
    assert_eq!(result.errors, vec![ParseError { line: 2, error: "Invalid phone number: bad".into() }]);
}

#[test]
fn test_mixed_batch_keeps_good_rows() {
    let text = "0241234567 2\nnope\n0551234567 500\n0201234567 1";
    let result = parse_bulk_input(text, Network::At);
    assert_eq!(result.purchases.len(), 2);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].line, 2);
    assert_eq!(result.errors[1].line, 3);
    assert!(result.purchases.iter().all(|p| p.network == Network::At));
}

#[test]
fn test_reparse_is_identical() {
    let text = "0241234567 2\nbad 1\n0551234567 500";
    assert_eq!(parse_bulk_input(text, Network::Mtn), parse_bulk_input(text, Network::Mtn));
}

#[test]
fn test_empty_input() {
    let result = parse_bulk_input("", Network::Mtn);
    assert!(result.purchases.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn test_csv_with_header() {
    let csv = "phone,capacity\n0241234567,2\n233551234567,5\nbad,1\n";
    let result = parse_bulk_csv(csv.as_bytes(), Network::Mtn).unwrap();
    assert_eq!(
        result.purchases,
        vec![intent("0241234567", 2.0, Network::Mtn), intent("0551234567", 5.0, Network::Mtn)]
    );
    assert_eq!(result.errors, vec![ParseError { line: 3, error: "Invalid phone number: bad".into() }]);
}

#[test]
fn test_csv_without_header_and_short_rows() {
    let csv = "0241234567,2\n0551234567\n";
    let result = parse_bulk_csv(csv.as_bytes(), Network::Mtn).unwrap();
    assert_eq!(result.purchases.len(), 1);
    assert_eq!(result.errors, vec![ParseError { line: 2, error: INVALID_FORMAT_MESSAGE.into() }]);
}

#[test]
fn test_csv_bad_first_row_is_reported() {
    let csv = "badnumber,2\n0241234567,3\n";
    let result = parse_bulk_csv(csv.as_bytes(), Network::Mtn).unwrap();
    assert_eq!(result.purchases, vec![intent("0241234567", 3.0, Network::Mtn)]);
    assert_eq!(result.errors, vec![ParseError { line: 1, error: "Invalid phone number: badnumber".into() }]);
}

#[test]
fn test_csv_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Phone Number,Capacity (GB)").unwrap();
    writeln!(file, " 0241234567 , 1 ").unwrap();
    writeln!(file, ",").unwrap();
    writeln!(file, "0201234567,3").unwrap();
    let reader = std::fs::File::open(file.path()).unwrap();
    let result = parse_bulk_csv(reader, Network::Yello).unwrap();
    assert!(result.errors.is_empty());
    assert_eq!(result.purchases.len(), 2);
    assert_eq!(result.purchases[0].phone_number, "0241234567");
    assert_eq!(result.purchases[1].network, Network::Yello);
}

#[test]
fn test_quote_sums_matches() {
    let products = vec![product("MTN", 2.0, 9.0), product("MTN", 5.0, 20.0), product("AT", 2.0, 8.0)];
    let purchases = vec![
        intent("0241234567", 2.0, Network::Mtn),
        intent("0551234567", 5.0, Network::Mtn),
    ];
    let quote = quote_bulk(&purchases, &products);
    assert_eq!(quote.total, 29.0);
    assert!(quote.unmatched.is_empty());
    assert_eq!(quote.lines[1].unit_price, Some(20.0));
}

#[test]
fn test_quote_unmatched_rows_cost_nothing_but_are_reported() {
    let products = vec![product("mtn", 2.0, 9.0)];
    let purchases = vec![
        intent("0241234567", 2.0, Network::Mtn),
        intent("0551234567", 7.0, Network::Mtn),
        intent("0201234567", 2.0, Network::Telecel),
    ];
    let quote = quote_bulk(&purchases, &products);
    assert_eq!(quote.total, 9.0);
    assert_eq!(quote.unmatched, vec![1, 2]);
    assert_eq!(quote.lines[2].unit_price, None);
}

#[test]
fn test_check_submission() {
    let purchases = vec![intent("0241234567", 2.0, Network::Mtn)];
    assert_eq!(check_submission(&[], 0.0, Some(100.0)), Err(SubmissionBlocked::Empty));
    assert_eq!(
        check_submission(&purchases, 50.0, Some(10.0)),
        Err(SubmissionBlocked::InsufficientBalance { required: 50.0, available: 10.0 })
    );
    assert_eq!(check_submission(&purchases, 10.0, Some(10.0)), Ok(()));
    assert_eq!(check_submission(&purchases, 50.0, None), Ok(()));
}

#[test]
fn test_purchase_intent_wire_shape() {
    let json = serde_json::to_value(intent("0241234567", 2.0, Network::AtPremium)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"phoneNumber": "0241234567", "capacity": 2.0, "network": "AT_PREMIUM"})
    );
}
