use clap::{Parser, Subcommand};
use rust_qreader::tools::{collect_images, load_luma_alpha, read, read_all, read_many};
use rust_qreader::{ImageScanner, Payload, Segment};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "rust_qreader CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode the QR code in a single image
    Decode {
        #[arg(long)]
        image: PathBuf,
        /// Print every segment instead of only the first
        #[arg(long)]
        all: bool,
    },
    /// Print version, EC level, mask and geometry of a symbol
    Info {
        #[arg(long)]
        image: PathBuf,
        /// Luminance below which a pixel is dark
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Dump the unmasked data bits before error correction
    Bits {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Print the sampled module grid, `#` for dark
    Matrix {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Decode every image under a directory in parallel
    Batch {
        #[arg(long)]
        root: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let ok = match cli.command {
        Command::Decode { image, all } => decode_cmd(&image, all),
        Command::Info { image, threshold } => info_cmd(&image, threshold),
        Command::Bits { image, threshold } => bits_cmd(&image, threshold),
        Command::Matrix { image, threshold } => matrix_cmd(&image, threshold),
        Command::Batch { root, limit } => batch_cmd(&root, limit),
    };
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn describe(segment: &Segment) -> String {
    match &segment.payload {
        Payload::Number(n) => format!("{:?} ({} chars): {}", segment.mode, segment.char_count, n),
        Payload::Text(text) => format!("{:?} ({} chars): {}", segment.mode, segment.char_count, text),
        Payload::VCard(card) => format!("vCard:\n{card}"),
    }
}

fn decode_cmd(image: &Path, all: bool) -> bool {
    let result = if all {
        read_all(image)
    } else {
        read(image).map(|segment| vec![segment])
    };
    match result {
        Ok(segments) => {
            for segment in &segments {
                println!("{}", describe(segment));
            }
            true
        }
        Err(err) => {
            eprintln!("Failed to decode {}: {}", image.display(), err);
            false
        }
    }
}

fn info_cmd(image: &Path, threshold: Option<u8>) -> bool {
    let pixels = match load_luma_alpha(image) {
        Ok(pixels) => pixels,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return false;
        }
    };
    let mut scanner = match threshold {
        Some(t) => ImageScanner::with_threshold(&pixels, t),
        None => ImageScanner::new(&pixels),
    };

    println!("Image: {} ({}x{})", image.display(), pixels.width(), pixels.height());
    match scanner.format_info() {
        Ok(info) => {
            println!("Symbol: {info}");
            println!("Side: {} modules", info.side_length());
            if let Some(geometry) = info.geometry {
                println!(
                    "Canvas: ({}, {})-({}, {}), module {}x{} px",
                    geometry.canvas.left,
                    geometry.canvas.top,
                    geometry.canvas.right,
                    geometry.canvas.bottom,
                    geometry.module_size.0,
                    geometry.module_size.1
                );
            }
            true
        }
        Err(err) => {
            eprintln!("Failed at {:?}: {}", scanner.state(), err);
            false
        }
    }
}

fn bits_cmd(image: &Path, threshold: Option<u8>) -> bool {
    let pixels = match load_luma_alpha(image) {
        Ok(pixels) => pixels,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return false;
        }
    };
    let mut scanner = match threshold {
        Some(t) => ImageScanner::with_threshold(&pixels, t),
        None => ImageScanner::new(&pixels),
    };

    match scanner.raw_bits() {
        Ok(bits) => {
            for codeword in bits.chunks(8) {
                let text: String = codeword.iter().map(|&b| if b { '1' } else { '0' }).collect();
                println!("{text}");
            }
            true
        }
        Err(err) => {
            eprintln!("Failed at {:?}: {}", scanner.state(), err);
            false
        }
    }
}

fn matrix_cmd(image: &Path, threshold: Option<u8>) -> bool {
    let pixels = match load_luma_alpha(image) {
        Ok(pixels) => pixels,
        Err(err) => {
            eprintln!("Failed to load image {}: {}", image.display(), err);
            return false;
        }
    };
    let mut scanner = match threshold {
        Some(t) => ImageScanner::with_threshold(&pixels, t),
        None => ImageScanner::new(&pixels),
    };

    match scanner.module_matrix() {
        Ok(matrix) => {
            for y in 0..matrix.height() {
                let row: String = (0..matrix.width())
                    .map(|x| if matrix.get(x, y) { '#' } else { '.' })
                    .collect();
                println!("{row}");
            }
            true
        }
        Err(err) => {
            eprintln!("Failed at {:?}: {}", scanner.state(), err);
            false
        }
    }
}

fn batch_cmd(root: &Path, limit: Option<usize>) -> bool {
    if !root.exists() {
        eprintln!("Directory not found: {}", root.display());
        return false;
    }
    let mut images = collect_images(root);
    if let Some(limit) = limit {
        images.truncate(limit);
    }
    if images.is_empty() {
        println!("No images found under {}", root.display());
        return true;
    }

    let start = Instant::now();
    let results = read_many(&images);
    let elapsed = start.elapsed();

    let mut decoded = 0usize;
    for (path, result) in images.iter().zip(&results) {
        match result {
            Ok(segment) => {
                decoded += 1;
                println!("{}: {}", path.display(), describe(segment));
            }
            Err(err) => println!("{}: error: {}", path.display(), err),
        }
    }
    let rate = decoded as f64 / images.len() as f64 * 100.0;
    println!(
        "Decoded {}/{} = {:.2}% in {:.2?}",
        decoded,
        images.len(),
        rate,
        elapsed
    );
    true
}
