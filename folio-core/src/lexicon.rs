//! Fixed phrase-substitution lexicon
//!
//! The lexicon is a stand-in for translation: every source phrase found in a
//! text is replaced literally by its target phrase. Keys are applied one after
//! another in insertion order, each with `str::replace` semantics
//! (case-sensitive, left-to-right, non-overlapping). When two keys overlap in
//! a text, whichever comes first in iteration order wins; later keys only see
//! what is left. Targets are not protected from later keys either.

use crate::error::ConfigError;
use std::path::Path;

/// Ordered mapping of source-language phrases to target-language phrases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lexicon {
    entries: Vec<(String, String)>,
}

/// Phrases of the built-in quarterly financial report lexicon
const FINANCIAL: &[(&str, &str)] = &[
    ("苹果", "Apple"),
    ("财年", "Fiscal Year"),
    ("第一季度", "First Quarter"),
    ("财报会议", "Financial Report Meeting"),
    ("公司", "Company"),
    ("创纪录的收入", "Record Revenue"),
    ("美元", "USD"),
    ("同比增长", "Year-over-Year Growth"),
    ("美洲", "Americas"),
    ("欧洲", "Europe"),
    ("日本", "Japan"),
    ("亚太地区", "Asia Pacific"),
    ("历史新高", "All-Time High"),
    ("新兴市场", "Emerging Markets"),
    ("显著的收入增长", "Significant Revenue Growth"),
    ("尤其是", "Especially in"),
    ("拉丁美洲", "Latin America"),
    ("中东", "Middle East"),
    ("南亚", "South Asia"),
    ("蒂姆·库克", "Tim Cook"),
    ("产品表现", "Product Performance"),
    ("可穿戴设备", "Wearables"),
    ("家居", "Home"),
    ("配件", "Accessories"),
    ("服务业务", "Services Business"),
    ("继续吸引观众", "Continues to Attract Viewers"),
    ("获得了", "Received"),
    ("超过", "Over"),
    ("提名", "Nominations"),
    ("奖项", "Awards"),
    ("未来展望", "Future Outlook"),
    ("计划", "Plans"),
    ("在沙特阿拉伯开设旗舰店", "to Open a Flagship Store in Saudi Arabia"),
    (
        "继续在印度等新兴市场扩展业务",
        "Continue to Expand Business in Emerging Markets like India",
    ),
    ("推出更多语言版本", "Launch More Language Versions of"),
    ("包括", "Including"),
    ("法语", "French"),
    ("德语", "German"),
    ("意大利语", "Italian"),
    (
        "我们将继续投资于创新和变革性工具",
        "We Will Continue to Invest in Innovative and Transformative Tools",
    ),
    ("以帮助用户在日常生活中受益", "to Help Users Benefit in Their Daily Lives"),
    ("财务状况", "Financial Condition"),
    ("毛利率", "Gross Margin"),
    ("净收入", "Net Income"),
    ("向股东返还", "Returned to Shareholders"),
];

impl Lexicon {
    /// Lexicon with no entries; translation is the identity
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in financial report lexicon
    pub fn financial() -> Self {
        FINANCIAL.iter().copied().collect()
    }

    /// Append an entry. Empty source phrases would match everywhere and are dropped.
    pub fn insert(&mut self, source: impl Into<String>, target: impl Into<String>) {
        let source = source.into();
        if source.is_empty() {
            tracing::warn!("Ignoring lexicon entry with an empty source phrase");
            return;
        }
        self.entries.push((source, target.into()));
    }

    /// Builder form of [`Lexicon::insert`]
    pub fn with_entry(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.insert(source, target);
        self
    }

    /// Parse a JSON array of `[source, target]` pairs, keeping their order
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let pairs: Vec<(String, String)> = serde_json::from_str(json)?;
        Ok(pairs.into_iter().collect())
    }

    /// Load a lexicon file in the format of [`Lexicon::from_json_str`]
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Substitute every known phrase in `text`
    pub fn translate(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (source, target) in &self.entries {
            if result.contains(source.as_str()) {
                result = result.replace(source.as_str(), target);
            }
        }
        result
    }

    /// Whether any source phrase occurs in `text`
    pub fn matches(&self, text: &str) -> bool {
        self.entries
            .iter()
            .any(|(source, _)| text.contains(source.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut lexicon = Lexicon::empty();
        for (source, target) in iter {
            lexicon.insert(source, target);
        }
        lexicon
    }
}
