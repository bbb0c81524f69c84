//! Times the naive and Bresenham line rasterizers on the same random lines.

use std::time::{Duration, Instant};

use clap::Parser;

use scanfill::raster::LineAlgorithm;
use scanfill::util::Rng;
use scanfill::{ChannelOrder, Color, PixelBuffer, Result};

#[derive(Parser, Debug)]
#[command(name = "line_bench", version, about = "Naive vs. Bresenham line timing")]
struct Args {
    /// Lines drawn per pass
    #[arg(long, default_value_t = 20_000)]
    lines: usize,

    /// Passes per algorithm; the fastest pass is reported
    #[arg(long, default_value_t = 5)]
    passes: usize,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,

    /// RNG seed for the line endpoints
    #[arg(long, default_value_t = 0x5CA9_F111)]
    seed: u64,
}

fn best_pass(
    buffer: &mut PixelBuffer,
    lines: &[(i32, i32, i32, i32)],
    passes: usize,
    algorithm: LineAlgorithm,
) -> Duration {
    let mut best = Duration::MAX;
    for pass in 0..passes.max(1) {
        buffer.clear(Color::BLACK);
        let start = Instant::now();
        for &(x1, y1, x2, y2) in lines {
            buffer.draw_line(Color::WHITE, x1, y1, x2, y2, algorithm);
        }
        let elapsed = start.elapsed();
        log::debug!("{:?} pass {}: {:?}", algorithm, pass, elapsed);
        best = best.min(elapsed);
    }
    best
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut buffer = PixelBuffer::new(args.width, args.height, ChannelOrder::Rgba)?;
    let mut rng = Rng::new(args.seed);
    let (max_x, max_y) = (args.width as i32 - 1, args.height as i32 - 1);
    let lines: Vec<_> = (0..args.lines)
        .map(|_| {
            (
                rng.range_i32(0, max_x),
                rng.range_i32(0, max_y),
                rng.range_i32(0, max_x),
                rng.range_i32(0, max_y),
            )
        })
        .collect();

    log::info!(
        "{} lines on {}x{}, best of {} passes",
        lines.len(),
        args.width,
        args.height,
        args.passes
    );

    let naive = best_pass(&mut buffer, &lines, args.passes, LineAlgorithm::Naive);
    let bresenham = best_pass(&mut buffer, &lines, args.passes, LineAlgorithm::Bresenham);

    let per_line = |d: Duration| d.as_secs_f64() * 1e9 / lines.len().max(1) as f64;
    log::info!("naive:     {:?} ({:.1} ns/line)", naive, per_line(naive));
    log::info!("bresenham: {:?} ({:.1} ns/line)", bresenham, per_line(bresenham));
    log::info!(
        "naive / bresenham: {:.2}",
        naive.as_secs_f64() / bresenham.as_secs_f64().max(f64::MIN_POSITIVE)
    );
    Ok(())
}
