// src/cli/prompt.rs — `faithjudge prompt` (dry run)

use super::PairArgs;
use crate::judge::prompt;

pub fn run_prompt(pair: &PairArgs) -> anyhow::Result<()> {
    let (input, output) = pair.read()?;
    println!("{}", prompt::render(&input, &output)?);
    Ok(())
}
