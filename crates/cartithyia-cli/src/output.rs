//! Result rendering for completed commands.

use cartithyia_media::OutputReport;

pub(crate) fn render_report(label: &str, report: &OutputReport) {
    println!("{}", format_report(label, report));
}

pub(crate) fn format_report(label: &str, report: &OutputReport) -> String {
    format!(
        "{label} written to {} ({} bytes)",
        report.destination.display(),
        report.bytes
    )
}
