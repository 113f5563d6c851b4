use anyhow::{bail, Context, Result};
use pathway_designer::config::ConfigManager;
use pathway_designer::engines::optimisation::{LogProgressCallback, StrategyKind};
use pathway_designer::engines::{PathwayRunner, RunOutcome, RunRequest};
use pathway_designer::types::Species;
use serde_json::json;
use std::env;
use std::path::Path;

fn usage() -> &'static str {
    "usage: pathway-designer [simulate|genetic|differential] [config.toml]"
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() > 2 {
        bail!(usage());
    }

    let request = match args.first().map(String::as_str) {
        None | Some("simulate") => RunRequest::Simulate,
        Some(name) => RunRequest::Optimize(
            name.parse::<StrategyKind>()
                .with_context(|| usage())?,
        ),
    };

    let manager = ConfigManager::new();
    manager
        .load(args.get(1).map(Path::new))
        .context("failed to load configuration")?;
    let runner = PathwayRunner::new(manager.get())?;

    let method = match request {
        RunRequest::Simulate => "simulation".to_string(),
        RunRequest::Optimize(kind) => kind.to_string(),
    };
    let outcome = runner
        .run(request, LogProgressCallback::new(method))
        .context("run failed")?;

    let report = match &outcome {
        RunOutcome::Simulated { params, trajectory } => json!({
            "params": params,
            "final_state": trajectory.final_state(),
            "series": Species::ALL
                .iter()
                .map(|s| (s.label(), trajectory.series(*s)))
                .collect::<std::collections::BTreeMap<_, _>>(),
            "time": trajectory.times(),
        }),
        RunOutcome::Optimized { result, params, trajectory } => json!({
            "method": result.method,
            "best_params": params,
            "best_fitness": result.best_fitness,
            "generations": result.generations,
            "evaluations": result.evaluations,
            "termination": result.termination,
            "final_state": trajectory.as_ref().and_then(|t| t.final_state()),
        }),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
