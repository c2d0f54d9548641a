//! tessera CLI - wavelet still-image codec command-line utility.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use tessera_codec::{Color, Compression, LogReporter, Settings, Wavelet, Wrap};

/// Lossy still-image codec built around a 2D wavelet lift, rANS/Kagari
/// entropy coding and a tiled container
#[derive(Parser)]
#[command(name = "tessera")]
#[command(author = "tessera-codec contributors")]
#[command(version)]
#[command(about = "Encode and decode images through the tessera wavelet container", long_about = None)]
#[command(after_help = "EXAMPLES:
    tessera encode -i pixels.raw -o image.tsc -w 256 -h 256 -n 3
    tessera encode -i pixels.raw -o image.tsc -w 256 -h 256 -n 3 --ratio 10
    tessera decode -i image.tsc -o pixels.raw
    tessera info -i image.tsc

Raw pixel files are planar-free, interleaved, 8-bit-per-sample rasters:
width * height * channels bytes, row-major, channel-minor.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a raw interleaved pixel file into a tessera container
    #[command(visible_alias = "e")]
    Encode {
        /// Path to the raw pixel data file
        #[arg(short, long)]
        input: PathBuf,

        /// Path for the encoded container
        #[arg(short, long)]
        output: PathBuf,

        /// Image width in pixels
        #[arg(short, long)]
        width: u32,

        /// Image height in pixels
        #[arg(short = 'H', long)]
        height: u32,

        /// Number of interleaved channels
        #[arg(short = 'n', long, default_value = "3")]
        channels: u32,

        /// Bits per sample (1-8)
        #[arg(short, long, default_value = "8")]
        depth: u32,

        /// Color transform
        #[arg(long, default_value = "ycocg", value_enum)]
        color: ColorArg,

        /// Wavelet kernel
        #[arg(long, default_value = "cdf53", value_enum)]
        wavelet: WaveletArg,

        /// Quantization step (>= 1.0, ignored when --ratio is set)
        #[arg(long, default_value = "64.0")]
        quantization: f64,

        /// Target compression ratio (uncompressed / compressed); 0 disables rate control
        #[arg(long, default_value = "0.0")]
        ratio: f64,

        /// Square tile dimension, a power of two >= 8; 0 means one tile
        #[arg(long, default_value = "0")]
        tiles_dimension: u32,

        /// Print a per-tile progress line to stderr while encoding
        #[arg(long)]
        verbose: bool,
    },

    /// Decode a tessera container back to a raw interleaved pixel file
    #[command(visible_alias = "d")]
    Decode {
        /// Path to the tessera container
        #[arg(short, long)]
        input: PathBuf,

        /// Path for the decoded raw pixel file
        #[arg(short, long)]
        output: PathBuf,

        /// Print a per-tile progress line to stderr while decoding
        #[arg(long)]
        verbose: bool,
    },

    /// Display container metadata without fully decoding the image
    #[command(visible_alias = "i")]
    Info {
        /// Path to the tessera container
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum ColorArg {
    Ycocg,
    SubtractG,
    None,
}

#[derive(Clone, ValueEnum)]
enum WaveletArg {
    Cdf53,
    Haar,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            width,
            height,
            channels,
            depth,
            color,
            wavelet,
            quantization,
            ratio,
            tiles_dimension,
            verbose,
        } => encode_file(&input, &output, width, height, channels, depth, color, wavelet, quantization, ratio, tiles_dimension, verbose),
        Commands::Decode { input, output, verbose } => decode_file(&input, &output, verbose),
        Commands::Info { input } => show_info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn encode_file(
    input: &PathBuf,
    output: &PathBuf,
    width: u32,
    height: u32,
    channels: u32,
    depth: u32,
    color: ColorArg,
    wavelet: WaveletArg,
    quantization: f64,
    ratio: f64,
    tiles_dimension: u32,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pixels = fs::read(input)?;

    let settings = Settings::default()
        .with_color(match color {
            ColorArg::Ycocg => Color::YCoCg,
            ColorArg::SubtractG => Color::SubtractG,
            ColorArg::None => Color::None,
        })
        .with_wavelet(match wavelet {
            WaveletArg::Cdf53 => Wavelet::Cdf53,
            WaveletArg::Haar => Wavelet::Haar,
        })
        .with_compression(Compression::Kagari)
        .with_quantization(quantization)
        .with_ratio(ratio)
        .with_tiles_dimension(tiles_dimension)
        .with_wrap(Wrap::Clamp);

    let encoded = if verbose {
        let mut reporter = LogReporter::default();
        let encoded = tessera_codec::encode_with_reporter(&settings, width, height, channels, depth, &pixels, &mut reporter)?;
        for line in &reporter.lines {
            eprintln!("{line}");
        }
        encoded
    } else {
        tessera_codec::encode(&settings, width, height, channels, depth, &pixels)?
    };

    fs::write(output, &encoded)?;
    println!("Encoded {width}x{height} image ({channels} channels) to {output:?} ({} bytes)", encoded.len());
    Ok(())
}

fn decode_file(input: &PathBuf, output: &PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;

    let decoded = if verbose {
        let mut reporter = LogReporter::default();
        let decoded = tessera_codec::decode_with_reporter(&data, &mut reporter)?;
        for line in &reporter.lines {
            eprintln!("{line}");
        }
        decoded
    } else {
        tessera_codec::decode(&data)?
    };

    fs::write(output, &decoded.pixels)?;
    println!("Decoded {}x{} image ({} channels) to {output:?}", decoded.width, decoded.height, decoded.channels);
    Ok(())
}

fn show_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let decoded = tessera_codec::decode(&data)?;

    println!("File:       {input:?}");
    println!("Size:       {} bytes", data.len());
    println!("Dimensions: {}x{}", decoded.width, decoded.height);
    println!("Channels:   {}", decoded.channels);
    println!("Depth:      {} bits", decoded.depth);
    println!("Color:      {:?}", decoded.settings.color);
    println!("Wavelet:    {:?}", decoded.settings.wavelet);
    println!("Tiling:     {}", if decoded.settings.tiles_dimension == 0 { "none".to_string() } else { decoded.settings.tiles_dimension.to_string() });

    Ok(())
}
