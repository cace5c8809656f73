#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]

use bankdraw_cli::args::CliArgs;
use structopt::StructOpt;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::from_args();
    bankdraw_cli::init_logging(args.log_level())?;
    if let Some(result) = bankdraw_cli::run(&args.input_file, &args.options)? {
        result.print();
    }
    Ok(())
}
