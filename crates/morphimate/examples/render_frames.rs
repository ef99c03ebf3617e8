use argh::FromArgs;
use std::path::PathBuf;
use std::time::Duration;

use morphimate::{
    image::ImageSize,
    pipeline::{FrameProducer, StripeSupplier},
    MorphConfig,
};

#[derive(FromArgs)]
/// Render an endless chain of morphs between random stripe images to PNG files
struct Args {
    /// directory to write the frames to
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// number of frames to write
    #[argh(option, short = 'n', default = "100")]
    frames: usize,

    /// optional JSON configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// seed of the stripe generator
    #[argh(option, short = 's', default = "0")]
    seed: u64,

    /// number of random landmarks per image
    #[argh(option, short = 'l', default = "12")]
    landmarks: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = match &args.config {
        Some(path) => MorphConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => MorphConfig {
            size: ImageSize {
                width: 320,
                height: 240,
            },
            morph_steps: 10,
            tweens_per_morph: 5,
            ..Default::default()
        },
    };

    std::fs::create_dir_all(&args.output)?;

    let producer = FrameProducer::spawn(StripeSupplier::new(args.seed, args.landmarks), config)?;

    for _ in 0..args.frames {
        let frame = producer.recv_timeout(Duration::from_secs(30))?;

        let size = frame.image.size();
        let Some(rgb) = image::RgbImage::from_raw(
            size.width as u32,
            size.height as u32,
            frame.image.into_vec(),
        ) else {
            return Err("frame buffer does not match its size".into());
        };

        let path = args.output.join(format!("frame_{:05}.png", frame.index));
        rgb.save(&path)?;
        log::info!("{}: {}", path.display(), frame.label);
    }

    producer.stop()?;

    Ok(())
}
