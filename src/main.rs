use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use zetjob_module::runtime::Runtime;
use zetjob_module::{config, remote, runtime, settings, spec};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "zetjob-module")]
#[command(about = "Resolve a module's settings and run its script", long_about = None)]
struct Cli {
    /// key=value pairs binding every declared input and output.
    args: Vec<String>,

    #[arg(long, default_value = "spec.json")]
    spec: PathBuf,

    /// User script appended after the generated header.
    #[arg(long, default_value = "main.hql")]
    script: PathBuf,

    /// Where to write the generated script (default: a temporary file).
    #[arg(short = 'o', long)]
    out: Option<PathBuf>,

    #[arg(long, default_value = "files")]
    files_dir: PathBuf,

    #[arg(long, default_value = "jars")]
    jars_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = BackendArg::Hive)]
    backend: BackendArg,

    /// Generate the script without submitting it.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    Hive,
    Emr,
}

impl From<BackendArg> for runtime::Backend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Hive => runtime::Backend::Hive,
            BackendArg::Emr => runtime::Backend::Emr,
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "zetjob_module=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::RuntimeConfig::from_env()?;

    // 1) Load + validate spec.json.
    let module_spec = spec::load_spec_file(&cli.spec)
        .with_context(|| format!("load spec {}", cli.spec.display()))?;

    // 2) Resolve settings from CLI tokens and the parameter source.
    let cli_pairs = settings::parse_cli_pairs(&cli.args)?;
    let resolved = match &cfg.param_doc {
        Some(path) => {
            let doc = settings::ParamDocument::from_file(path)
                .with_context(|| format!("load parameter document {}", path.display()))?;
            settings::resolve(&module_spec, &cli_pairs, &doc)?
        }
        None => {
            tracing::warn!(
                var = config::PARAM_DOC_VAR,
                "no parameter document, binding params from environment"
            );
            let params = spec::env_params(&module_spec, &cfg.env_prefix, |k| {
                std::env::var(k).ok()
            })?;
            settings::resolve_with_params(&module_spec, &cli_pairs, params, Default::default())?
        }
    };

    tracing::info!(
        module = %resolved.name,
        description = %resolved.description,
        cmd = %resolved.cmd,
        "settings resolved"
    );
    for (name, param) in &resolved.param {
        tracing::debug!(param = %name, kind = param.kind().label(), raw = param.raw(), "bound param");
    }

    // 3) Generate and (unless dry-run) submit.
    let layout = runtime::ModuleLayout {
        files_dir: cli.files_dir,
        jars_dir: cli.jars_dir,
    };
    let rt: Box<dyn Runtime + '_> = match runtime::Backend::from(cli.backend) {
        runtime::Backend::Hive => Box::new(runtime::HiveRuntime::new(
            &resolved,
            remote::HadoopCli::new(&cfg.hadoop_bin),
            layout,
            &cfg.beeline_bin,
            cfg.exit_policy,
        )),
        runtime::Backend::Emr => Box::new(runtime::EmrRuntime),
    };
    tracing::debug!(backend = ?rt.backend(), "runtime selected");

    let script = if cli.dry_run {
        rt.generate_script(&cli.script, cli.out.as_deref())
    } else {
        rt.execute(&cli.script, cli.out.as_deref())
    }
    .with_context(|| format!("run module script {}", cli.script.display()))?;
    println!("Wrote {}", script.display());

    Ok(())
}
