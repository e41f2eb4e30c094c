use std::path::PathBuf;

use clap::Parser;
use fc_compare::{
	Options, RepositorySource, DEFAULT_REGISTRY_URL, DEFAULT_REPOSITORY_URL, DEFAULT_YAML_DIR,
};

/// Every flag is optional; without any the run matches the upstream defaults.
#[derive(Parser, Debug)]
#[command(
	name = "compare-factory-config",
	about = "List factory entries whose GLIDEIN_ResourceName isn't a topology resource",
	version
)]
pub struct Cli {
	/// Topology rgsummary endpoint
	#[arg(long, env = "FC_REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
	pub registry_url: String,

	/// Factory repository to clone
	#[arg(long, env = "FC_REPOSITORY", default_value = DEFAULT_REPOSITORY_URL)]
	pub repository: String,

	/// Use an existing factory checkout instead of cloning
	#[arg(long, env = "FC_FACTORY_DIR", value_name = "DIR", conflicts_with = "repository")]
	pub factory_dir: Option<PathBuf>,

	/// Clone into a temporary directory below DIR instead of the system temp directory
	#[arg(long, env = "FC_WORK_DIR", value_name = "DIR")]
	pub work_dir: Option<PathBuf>,

	/// Directory of the checkout holding the *.yml documents
	#[arg(long, env = "FC_YAML_DIR", default_value = DEFAULT_YAML_DIR)]
	pub yaml_dir: PathBuf,

	/// Log the topology names as they are parsed
	#[arg(long, env = "FC_TREE_DUMP")]
	pub tree_dump: bool,

	/// Log the GLIDEIN_ResourceNames found in the factory
	#[arg(long, env = "FC_FACTORY_DUMP")]
	pub factory_dump: bool,
}

impl From<Cli> for Options {
	fn from(cli: Cli) -> Self {
		Self {
			registry_url: cli.registry_url,
			repository: match cli.factory_dir {
				Some(dir) => RepositorySource::Local(dir),
				None => RepositorySource::Remote(cli.repository),
			},
			work_dir: cli.work_dir,
			yaml_dir: cli.yaml_dir,
			tree_dump: cli.tree_dump,
			factory_dump: cli.factory_dump,
		}
	}
}
