use std::path::PathBuf;

use elemtris_engine::GameConfig;

use crate::util;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ConfigArg) -> anyhow::Result<()> {
    util::save_json(&GameConfig::default(), arg.output.as_deref())
}
