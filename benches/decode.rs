use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qrcode::{Color, EcLevel, QrCode, Version as EncodeVersion};
use rust_qreader::{
    ECLevel, LumaBuffer, MaskPattern, PrecomputedBitScanner, QrDecoder, SymbolInfo, Version,
    decode, decode_all,
};

const BORDER_MODULES: u32 = 4;

/// Render `data` as a symbol with a quiet zone and square `module`-pixel modules.
fn render(data: &[u8], version: i16, module: u32) -> LumaBuffer {
    let code = QrCode::with_version(data, EncodeVersion::Normal(version), EcLevel::M)
        .expect("data fits the requested version");
    let width = code.width() as u32;
    let colors = code.to_colors();
    let side = (width + 2 * BORDER_MODULES) * module;
    LumaBuffer::from_fn(side, side, |x, y| {
        let (mx, my) = (x / module, y / module);
        if mx < BORDER_MODULES
            || my < BORDER_MODULES
            || mx >= width + BORDER_MODULES
            || my >= width + BORDER_MODULES
        {
            return 255;
        }
        let index = ((my - BORDER_MODULES) * width + (mx - BORDER_MODULES)) as usize;
        if colors[index] == Color::Dark { 0 } else { 255 }
    })
}

fn bench_decode_images(c: &mut Criterion) {
    let cases = [
        ("v1_numeric", render(b"4376471154038", 1, 4)),
        ("v5_text", render(b"https://example.com/some/path?query=value", 5, 4)),
        ("v10_bytes", render(&[b'x'; 150], 10, 3)),
        ("v25_bytes", render(&[b'y'; 600], 25, 2)),
    ];

    for (name, image) in &cases {
        c.bench_function(&format!("decode_{name}"), |b| {
            b.iter(|| decode(black_box(image)).expect("decodes"))
        });
    }

    let (_, image) = &cases[1];
    c.bench_function("decode_all_v5_text", |b| {
        b.iter(|| decode_all(black_box(image)).expect("decodes"))
    });
}

fn bench_decode_precomputed_bits(c: &mut Criterion) {
    // byte mode, 13 characters "Hello, world!", then a terminator
    let mut bits = String::from("0100 00001101");
    for byte in b"Hello, world!" {
        bits.push_str(&format!(" {byte:08b}"));
    }
    bits.push_str(" 0000");
    let info = SymbolInfo::new(
        Version::new(1).expect("valid version"),
        ECLevel::M,
        MaskPattern::Pattern0,
    );

    c.bench_function("decode_precomputed_bits", |b| {
        b.iter(|| {
            let scanner = PrecomputedBitScanner::from_bit_str(info, black_box(&bits))
                .expect("valid bit string");
            QrDecoder::new(scanner).decode_all().expect("decodes")
        })
    });
}

criterion_group!(benches, bench_decode_images, bench_decode_precomputed_bits);
criterion_main!(benches);
