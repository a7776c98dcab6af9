use super::common::{Host, LOG_TARGET};
use crate::config::{Endpoints, Environment};
use crate::misc::{
    ColorMode, PACKAGE_JSON, PACKAGE_LOCK, RULE_SET, YARN_LOCK, is_valid_package_name, project_dir, read_optional, read_required,
};
use crate::model::{Outcome, Subject, ValidationRequest};
use crate::reports::{ReportOptions, generate_console, generate_node_logs, write_no_result, write_verdict};
use crate::service::{DEFAULT_POLL_INTERVAL_MS, LogProgress, PollSettings, Poller, Progress, ServiceClient, SpinnerProgress};
use crate::summary::summarize;
use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use core::time::Duration;
use url::Url;

const INVALID_PARAMETERS: &str = "invalid parameters use --help";

/// How long to wait before showing the spinner.
const SPINNER_DELAY: Duration = Duration::from_millis(500);

#[derive(Args, Debug, Clone)]
pub struct ValidationArgs {
    /// Project directory or path to its package.json
    #[arg(value_name = "PACKAGE_PATH")]
    pub package_path: Option<Utf8PathBuf>,

    /// Validate a package from the npm registry, optionally with a version (name@version).
    /// Ignored when a package path is given.
    #[arg(long, value_name = "NAME")]
    pub npm: Option<String>,

    /// Only consider production dependencies
    #[arg(long)]
    pub prod: bool,

    /// Ask the service to re-evaluate even if a cached result exists
    #[arg(short, long)]
    pub force: bool,

    /// List every error and warning instead of the first ten of each
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory or file holding corp-check-rules.json
    #[arg(long, value_name = "PATH")]
    pub rule_set: Option<Utf8PathBuf>,

    /// Send the project's package-lock.json
    #[arg(long)]
    pub package_lock: bool,

    /// Send the project's yarn.lock
    #[arg(long, conflicts_with = "package_lock")]
    pub yarn_lock: bool,

    /// Print the logs of every package in the dependency tree before the summary
    #[arg(long)]
    pub tree: bool,

    /// Maximum depth of the tree listing, where 0 shows only the root package
    #[arg(long, value_name = "LEVELS", requires = "tree")]
    pub depth: Option<usize>,

    /// When to color the report
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, value_name = "WHEN")]
    pub color: ColorMode,

    /// Service deployment to use (dev, stage, prod)
    #[arg(
        long = "env",
        env = "ENV",
        default_value = "prod",
        value_parser = Environment::parse_lenient,
        value_name = "ENVIRONMENT"
    )]
    pub environment: Environment,

    /// Override the API root of the selected deployment
    #[arg(long, env = "CORP_CHECK_API_ENDPOINT", value_name = "URL")]
    pub api_endpoint: Option<Url>,

    /// Delay between status requests
    #[arg(long, env = "WAIT_TO_EVALUATION_INTERVAL", default_value_t = DEFAULT_POLL_INTERVAL_MS, value_name = "MILLISECONDS")]
    pub poll_interval: u64,

    /// Give up after this many status requests
    #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_poll_attempts: Option<u32>,

    /// Give up after waiting this long for a result
    #[arg(long, value_name = "SECONDS")]
    pub max_wait_secs: Option<u64>,
}

impl ValidationArgs {
    fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: Duration::from_millis(self.poll_interval),
            max_attempts: self.max_poll_attempts,
            max_wait: self.max_wait_secs.map(Duration::from_secs),
        }
    }

    fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.environment, self.api_endpoint.clone())
    }

    /// Gather everything to submit. Fails before any network traffic when the inputs are unusable.
    fn build_request(&self) -> Result<ValidationRequest> {
        let (subject, project) = match (&self.package_path, &self.npm) {
            (Some(path), npm) => {
                if let Some(name) = npm {
                    log::warn!(target: LOG_TARGET, "Validating '{path}', ignoring --npm {name}");
                }
                let manifest = read_required(path, PACKAGE_JSON)?;
                (Subject::PackageJson(manifest), Some(project_dir(path)))
            }
            (None, Some(name)) if is_valid_package_name(name) => (Subject::PackageName(name.clone()), None),
            (None, Some(name)) => {
                log::debug!(target: LOG_TARGET, "Rejecting malformed package name '{name}'");
                bail!(INVALID_PARAMETERS);
            }
            (None, None) => bail!(INVALID_PARAMETERS),
        };

        if project.is_none() && (self.package_lock || self.yarn_lock) {
            bail!("--package-lock and --yarn-lock need a package path");
        }

        let rule_set_location = self.rule_set.as_deref().or(project).unwrap_or_else(|| Utf8Path::new("."));
        let rule_set = read_optional(rule_set_location, RULE_SET)?;
        if rule_set.is_none() && self.rule_set.is_some() {
            log::warn!(target: LOG_TARGET, "No rule set found at '{rule_set_location}', using the service defaults");
        }

        let mut request = ValidationRequest::new(subject);
        request.rule_set = rule_set;
        request.is_production = self.prod.then_some(true);
        request.force = self.force.then_some(true);

        if let Some(project) = project {
            if self.package_lock {
                request.package_lock = read_lock_file(project, PACKAGE_LOCK)?;
            }
            if self.yarn_lock {
                request.yarn_lock = read_lock_file(project, YARN_LOCK)?;
            }
        }

        Ok(request)
    }
}

fn read_lock_file(project: &Utf8Path, file_name: &str) -> Result<Option<String>> {
    let text = read_optional(project, file_name)?;
    if text.is_none() {
        log::warn!(target: LOG_TARGET, "Requested {file_name} was not found in '{project}', submitting without it");
    }
    Ok(text)
}

/// Submit a package, wait for its evaluation, and print the report.
///
/// Returns the process exit code: 0 when the package is accepted or recommended, 1 otherwise.
pub async fn validate<H: Host>(host: &mut H, args: &ValidationArgs) -> Result<i32> {
    let request = args.build_request()?;
    let endpoints = args.endpoints();
    let client = ServiceClient::new(endpoints.api.clone())?;

    let cid = client.submit(&request).await?.cid;
    log::info!(target: LOG_TARGET, "cid - {cid}");

    let interactive = host.is_terminal();
    let spinner = interactive.then(|| SpinnerProgress::new(SPINNER_DELAY));
    let _visibility = spinner.as_ref().map(SpinnerProgress::start_visibility_checking);
    let progress: &dyn Progress = match &spinner {
        Some(spinner) => spinner,
        None => &LogProgress,
    };

    let polled = Poller::new(&client, progress, args.poll_settings()).wait_for_completion(&cid).await;
    progress.finish();
    let response = polled.with_context(|| format!("waiting for validation '{cid}'"))?;

    let result_page = endpoints.result_page(&cid);
    let options = ReportOptions {
        verbose: args.verbose,
        colors: args.color.enabled(interactive),
    };

    let mut out = host.output();
    match response.into_outcome() {
        Outcome::Completed(result) => {
            if args.tree {
                generate_node_logs(&result.root_evaluation, args.verbose, args.depth, &mut out).context("writing the tree report")?;
            }

            let summary = summarize(&result.root_evaluation);
            log::debug!(
                target: LOG_TARGET,
                "{} error(s), {} warning(s), qualification {}",
                summary.error_count,
                summary.warning_count,
                result.qualification
            );

            generate_console(&summary, options, &mut out).context("writing the report")?;
            write_verdict(&result.qualification, &result_page, options, &mut out).context("writing the report")?;

            Ok(i32::from(!result.qualification.is_passing()))
        }
        Outcome::NoResult(state) => {
            write_no_result(state.as_ref(), &result_page, &mut out).context("writing the report")?;
            Ok(1)
        }
    }
}
