use anyhow::{bail, Context};
use bittmapp_lib::{bmp, Raster, RasterConfig, SelectionMask};
use clap::Parser;
use image::{GrayImage, Luma};
use log::{debug, info};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

mod config;

pub fn raster_from_image(img: &image::GrayImage, threshold: u8) -> Raster {
    // rasters are whole bytes wide; the padding columns stay clear
    let width = img.width().div_ceil(8) * 8;
    let mut raster = Raster::new(width, img.height());
    for (x, y, p) in img.enumerate_pixels() {
        if p.0[0] < threshold {
            raster.set_pixel(x, y);
        }
    }
    raster
}

pub fn image_from_raster(raster: &Raster) -> GrayImage {
    GrayImage::from_fn(raster.width(), raster.height(), |x, y| {
        Luma([if raster.is_set(x as i32, y as i32) { 0 } else { 255 }])
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Point {
    x: u32,
    y: u32,
}
impl FromStr for Point {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coords = parse_coords(s)?;
        let [x, y] = coords[..] else {
            return Err(format!("expected x,y but got {s:?}"));
        };
        Ok(Point { x, y })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Rect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}
impl FromStr for Rect {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coords = parse_coords(s)?;
        let [x0, y0, x1, y1] = coords[..] else {
            return Err(format!("expected x0,y0,x1,y1 but got {s:?}"));
        };
        Ok(Rect { x0, y0, x1, y1 })
    }
}

fn parse_coords(s: &str) -> Result<Vec<u32>, String> {
    s.split(',')
        .map(|n| n.trim().parse::<u32>().map_err(|e| format!("bad coordinate {n:?}: {e}")))
        .collect()
}

#[derive(clap::Args)]
struct SizeArgs {
    #[arg(short = 'W', long, help = "Width in pixels (a multiple of 8)")]
    width: Option<u32>,

    #[arg(short = 'H', long, help = "Height in pixels")]
    height: Option<u32>,
}
impl SizeArgs {
    fn config(&self) -> RasterConfig {
        RasterConfig {
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(clap::Subcommand)]
enum Command {
    #[command(about = "Create a blank bitmap")]
    New {
        #[command(flatten)]
        size: SizeArgs,

        #[arg(help = "Output path", index = 1)]
        output: PathBuf,
    },

    #[command(about = "Show the header of a bitmap")]
    Info {
        #[arg(help = "Bitmap path", index = 1)]
        path: PathBuf,
    },

    #[command(about = "Convert raw packed pixels (or a bitmap) to a bitmap")]
    Convert {
        #[command(flatten)]
        size: SizeArgs,

        #[arg(help = "Input path", index = 1)]
        input: PathBuf,

        #[arg(help = "Output path", index = 2)]
        output: PathBuf,
    },

    #[command(about = "Convert an image to a bitmap")]
    Import {
        #[arg(
            short = 'T',
            long,
            help = "Grayscale threshold; darker pixels are drawn [default: 128]"
        )]
        threshold: Option<u8>,

        #[arg(help = "Image path", index = 1)]
        input: PathBuf,

        #[arg(help = "Output path", index = 2)]
        output: PathBuf,
    },

    #[command(about = "Convert a bitmap to an image (format from the extension)")]
    Export {
        #[command(flatten)]
        size: SizeArgs,

        #[arg(help = "Bitmap path", index = 1)]
        input: PathBuf,

        #[arg(help = "Image path", index = 2)]
        output: PathBuf,
    },

    #[command(about = "Edit pixels of a bitmap")]
    Edit {
        #[command(flatten)]
        size: SizeArgs,

        #[arg(long = "set", value_name = "X,Y", help = "Draw a pixel")]
        set: Vec<Point>,

        #[arg(long = "clear", value_name = "X,Y", help = "Erase a pixel")]
        clear: Vec<Point>,

        #[arg(long = "fill", value_name = "X0,Y0,X1,Y1", help = "Draw a rectangle")]
        fill: Vec<Rect>,

        #[arg(long = "erase", value_name = "X0,Y0,X1,Y1", help = "Erase a rectangle")]
        erase: Vec<Rect>,

        #[arg(short = 'i', long, help = "Invert all pixels after the other edits")]
        invert: bool,

        #[arg(help = "Input path", index = 1)]
        input: PathBuf,

        #[arg(help = "Output path, or the input when omitted", index = 2)]
        output: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(version, about = "1-bit pixel art bitmaps")]
struct Args {
    #[arg(short = 'v', long, global = true, help = "Log debug output")]
    verbose: bool,

    #[arg(short = 'c', long, global = true, help = "Config file")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Load a bitmap, or raw packed pixels when the data doesn't look like a bitmap.
fn read_raster(path: &Path, size: RasterConfig) -> anyhow::Result<Raster> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if bmp::looks_like_bmp(&bytes) {
        return bmp::decode(&bytes).with_context(|| format!("Failed to decode {}", path.display()));
    }
    debug!("{} is not a bitmap, reading raw pixels", path.display());
    let (width, height) = size
        .validate()
        .with_context(|| format!("{} is not a bitmap, raw data needs a size", path.display()))?;
    let expected = bittmapp_lib::raster::packed_len(width, height);
    if bytes.len() != expected {
        bail!(
            "{} has {} bytes but {width}x{height} needs {expected}",
            path.display(),
            bytes.len()
        );
    }
    Ok(Raster::from_bytes(&bytes, width, height))
}

fn write_raster(path: &Path, raster: &Raster) -> anyhow::Result<()> {
    fs::write(path, bmp::encode(raster)).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("wrote {}x{} bitmap to {}", raster.width(), raster.height(), path.display());
    Ok(())
}

fn fill_rect(raster: &mut Raster, rect: Rect, on: bool) {
    // corners past i32::MAX are beyond any raster; saturate so they clip to the edge
    let corner = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
    let mut mask = SelectionMask::for_raster(raster);
    mask.select_rectangle(corner(rect.x0), corner(rect.y0), corner(rect.x1), corner(rect.y1));
    raster.fill_selection(&mask, on);
}

fn check_point(raster: &Raster, p: Point) -> anyhow::Result<()> {
    if p.x >= raster.width() || p.y >= raster.height() {
        bail!(
            "pixel {},{} is outside the {}x{} bitmap",
            p.x,
            p.y,
            raster.width(),
            raster.height()
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "warn" }),
    )
    .init();
    let config = config::load(args.config.as_deref())?;

    match args.command {
        Command::New { size, output } => {
            let raster = Raster::from_config(&config.raster.merge(size.config()))?;
            write_raster(&output, &raster)?;
        }
        Command::Info { path } => {
            let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
            if !bmp::looks_like_bmp(&bytes) {
                println!("{}: not a bitmap ({} bytes)", path.display(), bytes.len());
                return Ok(());
            }
            let header = bmp::decode_header(&bytes)?;
            println!("file length:       {}", header.file_length);
            println!("pixel data offset: {}", header.pixel_data_offset);
            println!("header length:     {}", header.header_length);
            println!("size:              {}x{}", header.width, header.height);
            println!("planes:            {}", header.planes);
            println!("bits per pixel:    {}", header.bits_per_pixel);
            println!("compression:       {}", header.compression);
            println!("image size:        {}", header.image_size);
            println!("colors:            {}", header.number_colors);
            println!("important colors:  {}", header.important_colors);
            let raster = bmp::decode(&bytes)?;
            println!("drawn pixels:      {}", raster.count_set());
        }
        Command::Convert { size, input, output } => {
            let raster = read_raster(&input, config.raster.merge(size.config()))?;
            write_raster(&output, &raster)?;
        }
        Command::Import {
            threshold,
            input,
            output,
        } => {
            let threshold = threshold.or(config.threshold).unwrap_or(config::DEFAULT_THRESHOLD);
            let img = image::open(&input)
                .with_context(|| format!("Failed to open image {}", input.display()))?
                .to_luma8();
            if img.width() == 0 || img.height() == 0 {
                bail!("{} is empty", input.display());
            }
            let raster = raster_from_image(&img, threshold);
            write_raster(&output, &raster)?;
        }
        Command::Export { size, input, output } => {
            let raster = read_raster(&input, config.raster.merge(size.config()))?;
            image_from_raster(&raster)
                .save(&output)
                .with_context(|| format!("Failed to write image {}", output.display()))?;
        }
        Command::Edit {
            size,
            set,
            clear,
            fill,
            erase,
            invert,
            input,
            output,
        } => {
            let mut raster = read_raster(&input, config.raster.merge(size.config()))?;
            for rect in fill {
                fill_rect(&mut raster, rect, true);
            }
            for rect in erase {
                fill_rect(&mut raster, rect, false);
            }
            for p in set {
                check_point(&raster, p)?;
                raster.set_pixel(p.x, p.y);
            }
            for p in clear {
                check_point(&raster, p)?;
                raster.clear_pixel(p.x, p.y);
            }
            if invert {
                raster.invert();
            }
            write_raster(output.as_deref().unwrap_or(&input), &raster)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points_and_rects() {
        assert_eq!("3,4".parse::<Point>(), Ok(Point { x: 3, y: 4 }));
        assert_eq!(" 1, 2 ".parse::<Point>(), Ok(Point { x: 1, y: 2 }));
        assert!("3".parse::<Point>().is_err());
        assert!("-1,2".parse::<Point>().is_err());
        assert_eq!(
            "0,1,2,3".parse::<Rect>(),
            Ok(Rect {
                x0: 0,
                y0: 1,
                x1: 2,
                y1: 3
            })
        );
        assert!("0,1,2".parse::<Rect>().is_err());
    }

    #[test]
    fn image_round_trip_pads_width() {
        let img = GrayImage::from_fn(10, 2, |x, y| Luma([if x == y { 0 } else { 200 }]));
        let raster = raster_from_image(&img, 128);
        assert_eq!((raster.width(), raster.height()), (16, 2));
        assert_eq!(raster.count_set(), 2);
        assert!(raster.is_set(0, 0));
        assert!(raster.is_set(1, 1));

        let back = image_from_raster(&raster);
        assert_eq!(back.get_pixel(0, 0).0, [0]);
        assert_eq!(back.get_pixel(1, 0).0, [255]);
        assert_eq!(back.get_pixel(15, 1).0, [255]);
    }

    #[test]
    fn fill_rect_uses_closed_rectangle() {
        let mut raster = Raster::new(8, 8);
        fill_rect(&mut raster, Rect { x0: 5, y0: 5, x1: 2, y1: 2 }, true);
        assert_eq!(raster.count_set(), 16);
        fill_rect(&mut raster, Rect { x0: 3, y0: 3, x1: 3, y1: 3 }, false);
        assert_eq!(raster.count_set(), 15);
    }

    #[test]
    fn fill_rect_clips_huge_corners() {
        let mut raster = Raster::new(8, 4);
        let rect = Rect {
            x0: 0,
            y0: 0,
            x1: 3_000_000_000,
            y1: 1,
        };
        fill_rect(&mut raster, rect, true);
        assert_eq!(raster.count_set(), 16);
        assert!(raster.is_set(7, 1));
        assert!(!raster.is_set(0, 2));
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("bittmapp_{}_{name}", std::process::id()))
    }

    #[test]
    fn read_raster_decodes_bitmaps() {
        let path = temp_path("read.bmp");
        let mut raster = Raster::new(16, 4);
        raster.set_pixel(9, 2);
        fs::write(&path, bmp::encode(&raster)).unwrap();
        // a size is not needed and is ignored for bitmaps
        let loaded = read_raster(&path, RasterConfig::new(8, 8)).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(loaded, raster);
    }

    #[test]
    fn read_raster_falls_back_to_raw() {
        let path = temp_path("read_raw.bin");
        fs::write(&path, [0x01u8; 16]).unwrap();
        let loaded = read_raster(&path, RasterConfig::new(16, 8));
        fs::remove_file(&path).ok();
        let loaded = loaded.unwrap();
        assert_eq!((loaded.width(), loaded.height()), (16, 8));
        assert_eq!(loaded.as_bytes(), &[0x01; 16]);
        assert!(loaded.is_set(0, 0));
        assert!(loaded.is_set(8, 0));
        assert_eq!(loaded.count_set(), 16);
    }

    #[test]
    fn raw_data_needs_a_size() {
        let path = temp_path("read_raw_nosize.bin");
        fs::write(&path, [0u8; 16]).unwrap();
        let result = read_raster(&path, RasterConfig::default());
        fs::remove_file(&path).ok();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("raw data needs a size"), "{err:#}");
        assert!(err.downcast_ref::<bittmapp_lib::InvalidConfig>().is_some());
    }

    #[test]
    fn raw_data_must_match_size() {
        let path = temp_path("read_raw_short.bin");
        fs::write(&path, [0u8; 15]).unwrap();
        let result = read_raster(&path, RasterConfig::new(16, 8));
        fs::remove_file(&path).ok();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("has 15 bytes but 16x8 needs 16"), "{err:#}");
    }

    #[test]
    fn read_raster_reports_missing_file() {
        let err = read_raster(&temp_path("does_not_exist.bmp"), RasterConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"), "{err:#}");
    }

    #[test]
    fn points_outside_are_rejected() {
        let raster = Raster::new(8, 4);
        assert!(check_point(&raster, Point { x: 7, y: 3 }).is_ok());
        assert!(check_point(&raster, Point { x: 8, y: 0 }).is_err());
        assert!(check_point(&raster, Point { x: 0, y: 4 }).is_err());
    }

    #[test]
    fn loads_explicit_config_file() {
        let path = temp_path("config.toml");
        fs::write(&path, "width = 24\nthreshold = 60\n").unwrap();
        let config = config::load(Some(&path));
        fs::remove_file(&path).ok();
        let config = config.unwrap();
        assert_eq!(config.raster.width, Some(24));
        assert_eq!(config.raster.height, None);
        assert_eq!(config.threshold, Some(60));

        assert!(config::load(Some(&temp_path("missing.toml"))).is_err());
    }

    #[test]
    fn png_files_round_trip() {
        let path = temp_path("export.png");
        let mut raster = Raster::new(8, 3);
        raster.set_pixel(2, 1);
        image_from_raster(&raster).save(&path).unwrap();
        let img = image::open(&path).map(|img| img.to_luma8());
        fs::remove_file(&path).ok();
        assert_eq!(raster_from_image(&img.unwrap(), config::DEFAULT_THRESHOLD), raster);
    }
}
