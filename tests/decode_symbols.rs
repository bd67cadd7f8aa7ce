//! End-to-end decoding of symbols rendered by an independent encoder
//!
//! Every symbol is drawn with a four-module quiet zone and square, whole-pixel
//! modules, then decoded from pixels through the public API.

use image::{GrayImage, Luma};
use qrcode::bits::Bits;
use qrcode::{Color, EcLevel, QrCode, Version as EncodeVersion};
use rust_qreader::tools::{decode_all_with_retry, decode_with_retry, read};
use rust_qreader::{
    ECLevel, ErrorKind, ImageScanner, LumaBuffer, Mode, PixelSource, QrDecoder, QrError, ScanState,
    decode, decode_all,
};

const QUIET_ZONE: u32 = 4;

fn draw(code: &QrCode, module: u32, dark: u8, light: u8) -> LumaBuffer {
    let width = code.width() as u32;
    let colors = code.to_colors();
    let side = (width + 2 * QUIET_ZONE) * module;
    LumaBuffer::from_fn(side, side, |x, y| {
        let (mx, my) = (x / module, y / module);
        let inside = |m: u32| (QUIET_ZONE..QUIET_ZONE + width).contains(&m);
        if !inside(mx) || !inside(my) {
            return light;
        }
        let index = ((my - QUIET_ZONE) * width + (mx - QUIET_ZONE)) as usize;
        if colors[index] == Color::Dark { dark } else { light }
    })
}

fn symbol(version: i16, ec: EcLevel, push: impl FnOnce(&mut Bits)) -> QrCode {
    let mut bits = Bits::new(EncodeVersion::Normal(version));
    push(&mut bits);
    bits.push_terminator(ec).expect("data fits");
    QrCode::with_bits(bits, ec).expect("valid symbol")
}

fn render(version: i16, ec: EcLevel, push: impl FnOnce(&mut Bits)) -> LumaBuffer {
    draw(&symbol(version, ec, push), 3, 0, 255)
}

#[test]
fn test_alphanumeric_hello_world() {
    let image = render(2, EcLevel::H, |bits| {
        bits.push_alphanumeric_data(b"HELLO WORLD").unwrap()
    });
    let mut decoder = QrDecoder::new(ImageScanner::new(&image));
    let info = decoder.info().unwrap();
    assert_eq!(info.version.number(), 2);
    assert_eq!(info.ec_level, ECLevel::H);

    let segment = decoder.first().unwrap();
    assert_eq!(segment.mode, Mode::Alphanumeric);
    assert_eq!(segment.char_count, 11);
    assert_eq!(segment.payload.as_text(), Some("HELLO WORLD"));
}

#[test]
fn test_numeric_digits() {
    let image = render(2, EcLevel::M, |bits| {
        bits.push_numeric_data(b"1112223330020159990").unwrap()
    });
    let segment = decode(&image).unwrap();
    assert_eq!(segment.mode, Mode::Numeric);
    assert_eq!(segment.char_count, 19);
    let number = segment.payload.as_number().unwrap();
    assert_eq!(number.to_u64(), Some(1112223330020159990));
}

#[test]
fn test_kanji() {
    // 新高 in Shift-JIS
    let image = render(1, EcLevel::M, |bits| {
        bits.push_kanji_data(&[0x90, 0x56, 0x8D, 0x82]).unwrap()
    });
    let segment = decode(&image).unwrap();
    assert_eq!(segment.mode, Mode::Kanji);
    assert_eq!(segment.char_count, 2);
    assert_eq!(segment.payload.as_text(), Some("新高"));
}

#[test]
fn test_latin1_bytes() {
    let image = render(3, EcLevel::M, |bits| {
        bits.push_byte_data(&[0xFB, 0x20, 0xFC, 0x20, 0xFD, 0x20, 0xFE]).unwrap()
    });
    let segment = decode(&image).unwrap();
    assert_eq!(segment.mode, Mode::Byte);
    assert_eq!(segment.payload.as_text(), Some("û ü ý þ"));
}

#[test]
fn test_utf8_bytes() {
    let text = "Grüße, 世界";
    let image = render(3, EcLevel::Q, |bits| bits.push_byte_data(text.as_bytes()).unwrap());
    let segment = decode(&image).unwrap();
    assert_eq!(segment.char_count, text.len());
    assert_eq!(segment.payload.as_text(), Some(text));
}

#[test]
fn test_vcard() {
    let card = "BEGIN:VCARD\nVERSION:3.0\nN:Blabla;Bla Bla\nTEL;TYPE=CELL:123456789\nEND:VCARD";
    let image = render(8, EcLevel::L, |bits| bits.push_byte_data(card.as_bytes()).unwrap());
    let segment = decode(&image).unwrap();
    let vcard = segment.payload.as_vcard().expect("vCard payload");
    assert_eq!(vcard.name.as_ref().unwrap().parts(), vec!["Blabla", "Bla Bla"]);
    assert_eq!(vcard.phones.len(), 1);
    assert_eq!(vcard.phones[0].parts(), vec!["CELL", "123456789"]);
}

#[test]
fn test_mixed_segments() {
    let image = render(4, EcLevel::M, |bits| {
        bits.push_numeric_data(b"0123456789").unwrap();
        bits.push_alphanumeric_data(b"ABC-$").unwrap();
        bits.push_byte_data(b"tail").unwrap();
    });
    let segments = decode_all(&image).unwrap();
    let modes: Vec<Mode> = segments.iter().map(|s| s.mode).collect();
    assert_eq!(modes, vec![Mode::Numeric, Mode::Alphanumeric, Mode::Byte]);
    assert_eq!(segments[0].payload.to_string(), "123456789");
    assert_eq!(segments[0].char_count, 10);
    assert_eq!(segments[1].payload.to_string(), "ABC-$");
    assert_eq!(segments[2].payload.to_string(), "tail");
}

#[test]
fn test_encoder_chosen_versions() {
    for (data, version) in [
        ("short", 1),
        ("https://example.com/a/longer/path?with=query", 5),
        ("lorem ipsum dolor sit amet, consectetur adipiscing elit. ", 10),
    ] {
        let code = QrCode::with_version(data, EncodeVersion::Normal(version), EcLevel::L).unwrap();
        let image = draw(&code, 2, 0, 255);
        let mut decoder = QrDecoder::new(ImageScanner::new(&image));
        assert_eq!(decoder.info().unwrap().version.number() as i16, version);
        let text: String = decoder
            .decode_all()
            .unwrap()
            .iter()
            .map(|s| s.payload.to_string())
            .collect();
        assert_eq!(text.to_lowercase(), data.to_lowercase(), "version {version}");
    }
}

#[test]
fn test_large_version_with_version_information() {
    let data = "x".repeat(400);
    let code = QrCode::with_version(data.as_bytes(), EncodeVersion::Normal(20), EcLevel::M).unwrap();
    let image = draw(&code, 2, 0, 255);
    let segment = decode(&image).unwrap();
    assert_eq!(segment.payload.as_text(), Some(data.as_str()));
}

#[test]
fn test_reset_replays_the_same_segments() {
    let image = render(2, EcLevel::M, |bits| {
        bits.push_alphanumeric_data(b"AB12").unwrap();
        bits.push_byte_data(b"cd").unwrap();
    });
    let mut decoder = QrDecoder::new(ImageScanner::new(&image));
    let first = decoder.decode_all().unwrap();
    decoder.reset();
    let second = decoder.decode_all().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_scanner_stops_at_the_failing_stage() {
    let blank = LumaBuffer::from_fn(40, 40, |_, _| 255);
    let mut scanner = ImageScanner::new(&blank);
    let err = scanner.format_info().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Geometry);
    assert_eq!(scanner.state(), ScanState::Unread);

    let image = render(1, EcLevel::L, |bits| bits.push_byte_data(b"ok").unwrap());
    let mut scanner = ImageScanner::new(&image);
    scanner.format_info().unwrap();
    assert!(scanner.state() >= ScanState::FormatResolved);
    assert_eq!(scanner.raw_bits().unwrap().len(), 26 * 8);
}

#[test]
fn test_unsupported_eci() {
    let image = render(1, EcLevel::L, |bits| {
        bits.push_eci_designator(26).unwrap();
        bits.push_byte_data(b"eci").unwrap();
    });
    let err = decode(&image).unwrap_err();
    assert!(matches!(err, QrError::Unsupported("Extended Channel Interpretation")));
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}

#[test]
fn test_pale_symbol_needs_an_estimated_threshold() {
    let code = symbol(2, EcLevel::M, |bits| bits.push_byte_data(b"pale ink").unwrap());
    let image = draw(&code, 3, 170, 250);

    assert_eq!(decode(&image).unwrap_err().kind(), ErrorKind::Geometry);
    assert_eq!(decode_with_retry(&image).unwrap().payload.as_text(), Some("pale ink"));
    assert_eq!(decode_all_with_retry(&image).unwrap().len(), 1);
}

#[test]
fn test_image_buffer_source_and_file_roundtrip() {
    let code = symbol(1, EcLevel::Q, |bits| bits.push_byte_data(b"on disk").unwrap());
    let rendered = draw(&code, 4, 0, 255);
    let (width, height) = (rendered.width(), rendered.height());
    let gray = GrayImage::from_fn(width, height, |x, y| {
        Luma([rendered.luma()[(y * width + x) as usize]])
    });

    assert_eq!(decode(&gray).unwrap().payload.as_text(), Some("on disk"));

    let path = std::env::temp_dir().join(format!("rust_qreader_symbol_{}.png", std::process::id()));
    gray.save(&path).unwrap();
    let segment = read(&path).unwrap();
    assert_eq!(segment.payload.as_text(), Some("on disk"));
    let _ = std::fs::remove_file(path);
}
