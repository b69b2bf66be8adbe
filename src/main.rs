use anyhow::anyhow;
use clap::Parser;
use std::error::Error;

#[derive(Debug, Parser)]
struct Args {
  /// Width of each bar, in terminal columns.
  #[clap(short, long, default_value_t = 2)]
  bar_width: u16,
  /// Gap between bars, in terminal columns.
  #[clap(short, long, default_value_t = 2)]
  gap_width: u16,
  /// Start with the bar animating at full height.
  #[clap(short, long)]
  animating: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
  let args = Args::parse();

  if args.bar_width == 0 {
    return Err(anyhow!("bar-width must be at least 1").into());
  }

  let res = tuivol::app::run(args.bar_width, args.gap_width, args.animating);
  if let Err(e) = res {
    println!("{:?}", e);
  }

  Ok(())
}
