use crate::pipeline::config::FilterConfig;

/// Level and keyword substring predicates, applied to the raw line
#[derive(Debug, Clone, Default)]
pub struct LineFilter {
    level: Option<String>,
    keyword: Option<String>,
}

impl LineFilter {
    pub fn new(level: Option<String>, keyword: Option<String>) -> Self {
        Self {
            level: level.filter(|s| !s.is_empty()),
            keyword: keyword.filter(|s| !s.is_empty()),
        }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.level.clone(), config.keyword.clone())
    }

    /// Case-sensitive containment; an absent filter matches everything
    pub fn matches(&self, line: &str) -> bool {
        let level_ok = self.level.as_deref().map_or(true, |l| line.contains(l));
        let keyword_ok = self.keyword.as_deref().map_or(true, |k| line.contains(k));
        level_ok && keyword_ok
    }
}
