//! User-facing text of the generated page.

use serde::{Deserialize, Serialize};

use roster_core::BadgeLabels;
use roster_model::{ChoiceKind, Dimension};

/// Labels for controls, badges and the summary line.
///
/// Serialized (camelCase) into the page config so the script uses the same
/// text as the server-rendered initial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLabels {
    pub year_label: String,
    pub site_label: String,
    /// Badge text when no year is selected.
    pub year_placeholder: String,
    /// Badge text when no site is selected.
    pub site_placeholder: String,
    /// Empty `<select>` option, or dropdown button text for multi-select.
    pub year_prompt: String,
    pub site_prompt: String,
    pub select_all: String,
    pub clear_all: String,
    pub export_button: String,
    pub export_tooltip: String,
    pub hint: String,
    pub heading: String,
    pub count_suffix: String,
    pub source_label: String,
    pub generated_label: String,
}

impl PageLabels {
    pub fn for_kind(kind: ChoiceKind) -> Self {
        let badges = BadgeLabels::for_kind(kind);
        let (year_prompt, site_prompt, hint, heading) = match kind {
            ChoiceKind::Cascading => (
                "年度を選択…",
                "事業所を選択…",
                "※年度を選ぶと事業所の選択肢が絞り込まれます。",
                "抽出結果",
            ),
            ChoiceKind::Independent => (
                "年度を選択（複数可）",
                "事業所を選択（複数可）",
                "※年度・事業所は複数選択できます（未選択の場合は全件）",
                "人事情報－検索結果",
            ),
        };
        Self {
            year_label: "年度".to_string(),
            site_label: "事業所".to_string(),
            year_placeholder: badges.year_placeholder,
            site_placeholder: badges.site_placeholder,
            year_prompt: year_prompt.to_string(),
            site_prompt: site_prompt.to_string(),
            select_all: "すべて選択".to_string(),
            clear_all: "すべて解除".to_string(),
            export_button: "CSVダウンロード".to_string(),
            export_tooltip: "現在の抽出結果をCSVで保存".to_string(),
            hint: hint.to_string(),
            heading: heading.to_string(),
            count_suffix: " 件".to_string(),
            source_label: "ソース".to_string(),
            generated_label: "生成日時".to_string(),
        }
    }

    pub fn badge_labels(&self) -> BadgeLabels {
        BadgeLabels::new(&self.year_placeholder, &self.site_placeholder)
    }

    pub fn label(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Year => &self.year_label,
            Dimension::Site => &self.site_label,
        }
    }

    pub fn prompt(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Year => &self.year_prompt,
            Dimension::Site => &self.site_prompt,
        }
    }

    pub fn count_text(&self, count: usize) -> String {
        format!("{count}{}", self.count_suffix)
    }
}
