use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use report_mock::ReportMock;

#[derive(Debug, Parser)]
pub struct Cli {
    /// Directory to output the JUnit, xUnit and NUnit XML files
    #[arg(required = true)]
    pub directory: PathBuf,

    #[command(flatten)]
    pub options: report_mock::Options,
}

fn main() -> Result<()> {
    let Cli { directory, options } = Cli::try_parse()?;

    let mut rm = ReportMock::new(options);
    println!("Using seed `{}` to generate random data.", rm.get_seed());

    let run = rm.generate_run();
    for path in rm.write_reports_to_dir(directory, &run)? {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
