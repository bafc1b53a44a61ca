//! Report rendering.

use clap::ValueEnum;
use colored::{Color, Colorize};

use sentinel::{BatchOutcome, TrustAssessment};

/// Score below this renders red
const RED_BAND: i32 = 50;
/// Score below this renders yellow
const YELLOW_BAND: i32 = 80;

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable report
    Pretty,
    /// Machine-readable JSON
    Json,
}

/// Print a batch report: assessed packages sorted by ascending score
/// (riskiest first), then the packages that could not be assessed.
pub fn print_batch(outcomes: &[BatchOutcome]) {
    let mut assessed: Vec<&TrustAssessment> = Vec::new();
    let mut skipped: Vec<(&str, &str)> = Vec::new();
    for outcome in outcomes {
        match outcome {
            BatchOutcome::Assessed(a) => assessed.push(a),
            BatchOutcome::Skipped {
                package_name,
                reason,
            } => skipped.push((package_name.as_str(), reason.as_str())),
        }
    }
    assessed.sort_by_key(|a| a.score);

    println!("\n--- Dependency Trust Report ---");
    for assessment in assessed {
        print_assessment(assessment);
    }
    for (name, reason) in skipped {
        println!("\nPackage: {}", name.bold());
        println!("  {} {}", "Could not assess:".yellow(), reason);
    }
    println!("\n--- End of Report ---");
}

/// Print one assessment with its risk factors.
pub fn print_assessment(assessment: &TrustAssessment) {
    println!(
        "\nPackage: {} ({})",
        assessment.package_name.bold(),
        assessment.version
    );
    println!(
        "  Trust Score: {}",
        format!("{}/100", assessment.score)
            .color(score_color(assessment.score))
            .bold()
    );
    if assessment.risk_factors.is_empty() {
        println!("  {}", "No major risk factors identified.".green());
    } else {
        println!("  {}", "Identified Risk Factors:".red());
        for factor in &assessment.risk_factors {
            println!("    - {factor}");
        }
    }
}

const fn score_color(score: i32) -> Color {
    if score < RED_BAND {
        Color::Red
    } else if score < YELLOW_BAND {
        Color::Yellow
    } else {
        Color::Green
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_bands() {
        assert!(matches!(score_color(0), Color::Red));
        assert!(matches!(score_color(49), Color::Red));
        assert!(matches!(score_color(50), Color::Yellow));
        assert!(matches!(score_color(79), Color::Yellow));
        assert!(matches!(score_color(80), Color::Green));
        assert!(matches!(score_color(100), Color::Green));
    }
}
