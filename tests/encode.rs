use qrgen::info::format_word;
use qrgen::{encode, EccLevel, EncodeError, EncodeOptions, Mode, Parameter, QrCode, Version};

fn read_format_copies(qr: &QrCode) -> (u32, u32) {
    let size = qr.size();
    let bit = |x: i32, y: i32, i: u32| u32::from(qr.get_module(x, y)) << i;

    let mut first = 0;
    for i in 0..6 {
        first |= bit(8, i as i32, i);
    }
    first |= bit(8, 7, 6) | bit(8, 8, 7) | bit(7, 8, 8);
    for i in 9..15 {
        first |= bit(14 - i as i32, 8, i);
    }

    let mut second = 0;
    for i in 0..8 {
        second |= bit(size - 1 - i as i32, 8, i);
    }
    for i in 8..15 {
        second |= bit(8, size - 15 + i as i32, i);
    }
    (first, second)
}

#[test]
fn hello_world_end_to_end() {
    let qr = encode("HELLO WORLD", &EncodeOptions::default()).unwrap();

    assert_eq!(qr.mode(), Mode::Alphanumeric);
    assert_eq!(qr.error_correction_level(), EccLevel::High);
    assert_eq!(qr.version(), Version::new(2));
    assert_eq!(qr.size(), 25);

    let expected = format_word(qr.error_correction_level(), qr.mask());
    assert_eq!(read_format_copies(&qr), (expected, expected));
    assert!(qr.get_module(8, qr.size() - 8));
}

#[test]
fn every_version_builds_a_square_grid() {
    for v in 1..=40u8 {
        let options = EncodeOptions::default()
            .with_ecc_level(EccLevel::Low)
            .with_version(i32::from(v))
            .with_mask(i32::from(v % 8));
        let qr = encode("0123456789", &options).unwrap();
        let size = 4 * i32::from(v) + 17;

        assert_eq!(qr.size(), size, "version {v}");
        assert_eq!(qr.modules().len(), (size * size) as usize);
        assert!(qr.rows().all(|row| row.len() == size as usize));

        // timing patterns between the finders
        for i in 8..size - 8 {
            assert_eq!(qr.get_module(i, 6), i % 2 == 0);
            assert_eq!(qr.get_module(6, i), i % 2 == 0);
        }

        let expected = format_word(EccLevel::Low, qr.mask());
        assert_eq!(read_format_copies(&qr), (expected, expected), "version {v}");
    }
}

#[test]
fn mask_selection_is_deterministic() {
    let text = "The quick brown fox jumps over the lazy dog";
    let first = encode(text, &EncodeOptions::default()).unwrap();
    for _ in 0..3 {
        assert_eq!(encode(text, &EncodeOptions::default()).unwrap(), first);
    }
}

#[test]
fn mode_is_chosen_from_text() {
    let auto = EncodeOptions::default();
    assert_eq!(encode("0123456789", &auto).unwrap().mode(), Mode::Numeric);
    assert_eq!(encode("AB-12 $%*+./:", &auto).unwrap().mode(), Mode::Alphanumeric);
    assert_eq!(encode("héllo wörld", &auto).unwrap().mode(), Mode::Byte);

    let forced = EncodeOptions::default().with_mode(Mode::Byte);
    assert_eq!(encode("0123456789", &forced).unwrap().mode(), Mode::Byte);
}

#[test]
fn empty_text_is_rejected() {
    let err = encode("", &EncodeOptions::default()).unwrap_err();
    assert_eq!(err.parameter(), Parameter::Text);
    assert_eq!(err.code(), 2);
}

#[test]
fn oversized_data_is_rejected() {
    let text = "a".repeat(2954);
    let err = encode(&text, &EncodeOptions::default()).unwrap_err();
    assert!(matches!(err, EncodeError::DataTooLong { .. }));
    assert_eq!(err.parameter(), Parameter::Version);
    assert_eq!(err.code(), 1);

    // the largest byte payload still fits, at the weakest level only
    let qr = encode(&text[1..], &EncodeOptions::default()).unwrap();
    assert_eq!(qr.version(), Version::MAX);
    assert_eq!(qr.error_correction_level(), EccLevel::Low);

    let err = encode(&text, &EncodeOptions::default().with_version(1)).unwrap_err();
    assert_eq!(err, EncodeError::VersionTooSmall(Version::new(1)));
    assert_eq!(err.code(), 3);
}

#[test]
fn forced_mode_mismatch() {
    let options = EncodeOptions::default().with_mode(Mode::Alphanumeric);
    let err = encode("hello", &options).unwrap_err();
    assert_eq!(err.parameter(), Parameter::Mode);
    assert_eq!(err.code(), 1);
    assert_eq!(err.to_string(), "text contains characters outside the alphanumeric alphabet");
}

#[test]
fn result_serializes() {
    let options = EncodeOptions::default().with_mask(3).with_margin(2);
    let qr = encode("HELLO WORLD", &options).unwrap();
    let value = serde_json::to_value(&qr).unwrap();

    assert_eq!(value["text"], "HELLO WORLD");
    assert_eq!(value["mode"], "alphanumeric");
    assert_eq!(value["ecc_level"], "H");
    assert_eq!(value["version"], 2);
    assert_eq!(value["mask"], 3);
    assert_eq!(value["size"], 25);
    assert_eq!(value["margin"], 2);
    assert_eq!(value["modules"].as_array().map(Vec::len), Some(625));
}

#[test]
fn out_of_range_config_reports_parameter_and_code() {
    let options: EncodeOptions =
        serde_json::from_str(r#"{ "version": { "fixed": 300 } }"#).unwrap();
    let err = encode("HELLO", &options).unwrap_err();
    assert_eq!(err, EncodeError::VersionOutOfRange(300));
    assert_eq!((err.parameter(), err.code()), (Parameter::Version, 2));

    let options: EncodeOptions = serde_json::from_str(r#"{ "mask": { "fixed": 8 } }"#).unwrap();
    let err = encode("HELLO", &options).unwrap_err();
    assert_eq!((err.parameter(), err.code()), (Parameter::Mask, 1));
}

#[test]
fn weaker_levels_fall_back_to_version_40() {
    let qr = encode(&"a".repeat(1500), &EncodeOptions::default()).unwrap();
    assert_eq!(qr.version(), Version::MAX);
    assert_eq!(qr.error_correction_level(), EccLevel::Quartile);
}

#[test]
fn options_from_json() {
    let options: EncodeOptions =
        serde_json::from_str(r#"{ "eccl": { "fixed": "M" }, "version": { "fixed": 1 } }"#)
            .unwrap();
    let qr = encode("HELLO WORLD", &options).unwrap();
    assert_eq!(qr.error_correction_level(), EccLevel::Medium);
    assert_eq!(qr.size(), 21);
    assert_eq!(qr.module_size(), 4);
}
