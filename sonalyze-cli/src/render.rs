use sonalyze_core::format::{
    format_average, format_bpm, format_date, format_file_size, format_key, format_lufs,
};
use sonalyze_core::messages::status_label;
use sonalyze_core::spectrum::SpectrumPoint;
use sonalyze_core::{AudioUpload, Locale, Stats};

const BAR_WIDTH: usize = 40;

pub fn upload_row(audio: &AudioUpload, locale: Locale) -> String {
    format!(
        "{:>6}  {:32}  {:11}  {:>9}  {:16}  {:>4}  {:10}  {}",
        audio.id,
        truncate(&audio.original_filename, 32),
        status_label(audio.status, locale),
        format_file_size(audio.filesize),
        format_date(&audio.uploaded_at, locale),
        format_bpm(audio.bpm),
        format_key(audio.key.as_deref()),
        format_lufs(audio.lufs),
    )
}

pub fn uploads_table(uploads: &[AudioUpload], page: u32, pages: u32, locale: Locale) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>6}  {:32}  {:11}  {:>9}  {:16}  {:>4}  {:10}  {}\n",
        "ID", "File", "Status", "Size", "Uploaded", "BPM", "Key", "Loudness"
    ));
    for audio in uploads {
        out.push_str(&upload_row(audio, locale));
        out.push('\n');
    }
    out.push_str(&format!("Page {page} of {pages}\n"));
    out
}

pub fn stats_summary(stats: &Stats) -> String {
    let storage = stats
        .total_size_mb
        .map(|mb| format!("{mb:.2} MB"))
        .unwrap_or_else(|| "-".to_string());
    [
        format!("Total uploads:   {}", stats.total_uploads),
        format!("Completed:       {}", stats.completed_analyses),
        format!("Pending:         {}", stats.pending_analyses),
        format!("Failed:          {}", stats.failed_analyses),
        format!("Average BPM:     {}", format_average(stats.average_bpm)),
        format!("Average LUFS:    {}", format_average(stats.average_lufs)),
        format!("Storage used:    {storage}"),
    ]
    .join("\n")
}

/// Horizontal bar chart of a binned spectrum, scaled between the smallest
/// and largest amplitude.
pub fn spectrum_chart(points: &[SpectrumPoint]) -> String {
    let min = points.iter().map(|p| p.amplitude).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.amplitude).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    points
        .iter()
        .map(|p| {
            let len = if range > 0.0 {
                (((p.amplitude - min) / range) * BAR_WIDTH as f64).round() as usize
            } else {
                BAR_WIDTH
            };
            format!("{:>3} {:<width$} {:.2}", p.frequency, "#".repeat(len), p.amplitude, width = BAR_WIDTH)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonalyze_core::AnalysisStatus;

    #[test]
    fn test_row_uses_placeholders() {
        let audio = AudioUpload {
            id: 12,
            original_filename: "voice memo.m4a".into(),
            filesize: 1536,
            uploaded_at: "2024-03-09T08:05:00".into(),
            status: AnalysisStatus::Pending,
            bpm: None,
            key: None,
            lufs: None,
            frequency_spectrum: None,
        };
        let row = upload_row(&audio, Locale::PtBr);
        assert!(row.contains("voice memo.m4a"));
        assert!(row.contains("Pendente"));
        assert!(row.contains("1.5 KB"));
        assert!(row.contains("09/03/2024 08:05"));
        assert!(row.trim_end().ends_with('-'));
    }

    #[test]
    fn test_truncate_long_names() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5).chars().count(), 5);
    }

    #[test]
    fn test_chart_scales_to_range() {
        let points = vec![
            SpectrumPoint { frequency: 0, amplitude: -60.0 },
            SpectrumPoint { frequency: 1, amplitude: -30.0 },
            SpectrumPoint { frequency: 2, amplitude: 0.0 },
        ];
        let chart = spectrum_chart(&points);
        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].matches('#').count(), 0);
        assert_eq!(lines[1].matches('#').count(), BAR_WIDTH / 2);
        assert_eq!(lines[2].matches('#').count(), BAR_WIDTH);
    }

    #[test]
    fn test_chart_of_nothing_is_empty() {
        assert!(spectrum_chart(&[]).is_empty());
    }
}
