/// Runs the configured case table end to end

use crate::case::TestCase;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::generator::{ensure_dir, generate_case, CaseReport};
use crate::progress::CaseProgress;
use indicatif::HumanBytes;
use tracing::{info, warn};

/// Outcome of a full run
#[derive(Clone, Debug, Default)]
pub struct RunReport {
    pub cases: Vec<CaseReport>,

    /// Cases not run because `stop_before_large` was set
    pub skipped: Vec<TestCase>,
}

impl RunReport {
    pub fn file_count(&self) -> usize {
        self.cases.iter().map(CaseReport::file_count).sum()
    }

    pub fn total_bytes(&self) -> u64 {
        self.cases.iter().map(CaseReport::total_bytes).sum()
    }

    /// Payloads dropped because their digest was already on disk
    pub fn duplicate_count(&self) -> u64 {
        self.cases.iter().map(|c| c.duplicates).sum()
    }
}

/// Generate every configured case under the root directory
pub fn run(config: &GeneratorConfig) -> Result<RunReport> {
    for case in &config.cases {
        case.validate()?;
    }
    ensure_dir(&config.root_dir)?;

    let mut report = RunReport::default();
    let cases = config.effective_cases();
    for (idx, case) in cases.iter().enumerate() {
        if config.stop_before_large && config.is_large(case) {
            warn!(
                "Stopping before {} ({} per file); {} case(s) skipped",
                case.name,
                HumanBytes(case.file_size),
                cases.len() - idx
            );
            report.skipped.extend(cases[idx..].iter().cloned());
            break;
        }

        info!("Case {}: {}", idx + 1, case);
        let progress = CaseProgress::for_case(case, config.progress);
        let case_report = generate_case(&config.root_dir, case, &progress)?;
        info!(
            "Finished {}: {} files, {} in {} ({} duplicates)",
            case.name,
            case_report.file_count(),
            HumanBytes(case_report.total_bytes()),
            case_report.dir.display(),
            case_report.duplicates
        );
        report.cases.push(case_report);
    }

    Ok(report)
}
