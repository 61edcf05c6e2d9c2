//! フィルタエンジン
//!
//! 等級・キュレーション状態・フリーテキスト検索をANDで合成する。
//! 未指定の条件は何も除外しない。出力順は入力順のまま。

use crate::curation::{CurationStatus, CurationStore};
use crate::error::Result;
use crate::types::DerivedIdea;

/// キュレーション状態の条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CurationFilter {
    #[default]
    Any,
    /// エントリが存在しない
    Uncurated,
    Status(CurationStatus),
}

impl std::str::FromStr for CurationFilter {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "" | "all" | "any" => Ok(CurationFilter::Any),
            "uncurated" | "none" => Ok(CurationFilter::Uncurated),
            other => other.parse().map(CurationFilter::Status),
        }
    }
}

impl std::fmt::Display for CurationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurationFilter::Any => write!(f, "all"),
            CurationFilter::Uncurated => write!(f, "uncurated"),
            CurationFilter::Status(status) => write!(f, "{}", status),
        }
    }
}

/// フィルタ条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// 完全一致（None/空文字はフィルタなし）
    pub grade: Option<String>,
    pub curation: CurationFilter,
    /// 大文字小文字を区別しない部分一致（None/空文字はフィルタなし）
    pub search: Option<String>,
}

impl FilterCriteria {
    /// 1件が全条件を満たすか
    pub fn matches(&self, idea: &DerivedIdea, curation: &CurationStore) -> bool {
        self.matches_grade(idea) && self.matches_curation(idea, curation) && self.matches_search(idea)
    }

    fn matches_grade(&self, idea: &DerivedIdea) -> bool {
        match active(&self.grade) {
            Some(grade) => idea.idea.grade.as_deref() == Some(grade),
            None => true,
        }
    }

    fn matches_curation(&self, idea: &DerivedIdea, curation: &CurationStore) -> bool {
        let current = idea.server_id().and_then(|id| curation.get(id));
        match self.curation {
            CurationFilter::Any => true,
            CurationFilter::Uncurated => current.is_none(),
            CurationFilter::Status(status) => current == Some(status),
        }
    }

    fn matches_search(&self, idea: &DerivedIdea) -> bool {
        let Some(query) = active(&self.search) else {
            return true;
        };
        let query = query.to_lowercase();
        [
            idea.idea.service_name.as_str(),
            idea.idea.problem.as_str(),
            idea.idea.concept_text(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// 条件に合うアイデアを入力順のまま返す
pub fn filter_ideas(
    ideas: &[DerivedIdea],
    criteria: &FilterCriteria,
    curation: &CurationStore,
) -> Vec<DerivedIdea> {
    ideas
        .iter()
        .filter(|idea| criteria.matches(idea, curation))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{aggregate_ideas, UidStrategy};
    use crate::types::{Batch, Idea};

    fn sample_ideas() -> Vec<DerivedIdea> {
        let ideas = vec![
            Idea {
                id: Some("i1".into()),
                service_name: "PayFlow".into(),
                problem: "Slow PAYMENTS settlement".into(),
                grade: Some("A".into()),
                weighted_score: Some(80.0),
                ..Default::default()
            },
            Idea {
                id: Some("i2".into()),
                service_name: "Farm Radar".into(),
                problem: "crop yield".into(),
                solution: "satellite payments for farmers".into(),
                grade: Some("B".into()),
                weighted_score: Some(60.0),
                ..Default::default()
            },
            Idea {
                hypothesis_id: Some("i3".into()),
                service_name: "Transit Now".into(),
                problem: "bus delays".into(),
                concept: "live ETA".into(),
                solution: "payments bundle".into(),
                grade: Some("A".into()),
                numrv_score: Some(40.0),
                ..Default::default()
            },
            Idea {
                service_name: "Anonymous".into(),
                grade: Some("A".into()),
                ..Default::default()
            },
        ];
        aggregate_ideas(
            &[Batch { batch_id: "b1".into(), timestamp: String::new(), ideas }],
            UidStrategy::Positional,
        )
    }

    fn uids(ideas: &[DerivedIdea]) -> Vec<&str> {
        ideas.iter().map(|i| i.uid.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let ideas = sample_ideas();
        let criteria = FilterCriteria {
            grade: Some(String::new()),
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter_ideas(&ideas, &criteria, &CurationStore::new()).len(), ideas.len());
    }

    #[test]
    fn test_grade_filter_exact() {
        let ideas = sample_ideas();
        let criteria = FilterCriteria { grade: Some("B".into()), ..Default::default() };
        assert_eq!(uids(&filter_ideas(&ideas, &criteria, &CurationStore::new())), vec!["i2"]);

        let none = FilterCriteria { grade: Some("C".into()), ..Default::default() };
        assert!(filter_ideas(&ideas, &none, &CurationStore::new()).is_empty());
    }

    #[test]
    fn test_search_payments() {
        let ideas = sample_ideas();
        let criteria = FilterCriteria { search: Some("payments".into()), ..Default::default() };
        let result = filter_ideas(&ideas, &criteria, &CurationStore::new());

        // i3 は concept があるので solution は検索対象外
        assert_eq!(uids(&result), vec!["i1", "i2"]);
    }

    #[test]
    fn test_curation_filter() {
        let ideas = sample_ideas();
        let mut store = CurationStore::new();
        store.apply("i1", Some(CurationStatus::Published));
        store.apply("i3", Some(CurationStatus::Rejected));

        let published = FilterCriteria {
            curation: CurationFilter::Status(CurationStatus::Published),
            ..Default::default()
        };
        assert_eq!(uids(&filter_ideas(&ideas, &published, &store)), vec!["i1"]);

        let uncurated = FilterCriteria { curation: CurationFilter::Uncurated, ..Default::default() };
        assert_eq!(uids(&filter_ideas(&ideas, &uncurated, &store)), vec!["i2", "b1-3"]);
    }

    #[test]
    fn test_composition_is_intersection() {
        let ideas = sample_ideas();
        let mut store = CurationStore::new();
        store.apply("i2", Some(CurationStatus::Hold));

        let grade = Some("A".to_string());
        let curation = CurationFilter::Uncurated;
        let search = Some("a".to_string());

        let combined = filter_ideas(
            &ideas,
            &FilterCriteria { grade: grade.clone(), curation, search: search.clone() },
            &store,
        );
        let by_grade = filter_ideas(&ideas, &FilterCriteria { grade, ..Default::default() }, &store);
        let by_curation = filter_ideas(&ideas, &FilterCriteria { curation, ..Default::default() }, &store);
        let by_search = filter_ideas(&ideas, &FilterCriteria { search, ..Default::default() }, &store);

        let expected: Vec<&str> = uids(&ideas)
            .into_iter()
            .filter(|u| {
                uids(&by_grade).contains(u) && uids(&by_curation).contains(u) && uids(&by_search).contains(u)
            })
            .collect();
        assert_eq!(uids(&combined), expected);
        assert!(!combined.is_empty());
    }

    #[test]
    fn test_output_keeps_input_order() {
        let mut ideas = sample_ideas();
        ideas.reverse();
        let criteria = FilterCriteria { grade: Some("A".into()), ..Default::default() };
        assert_eq!(uids(&filter_ideas(&ideas, &criteria, &CurationStore::new())), vec!["b1-3", "i3", "i1"]);
    }

    #[test]
    fn test_curation_filter_from_str() {
        assert_eq!("".parse::<CurationFilter>().unwrap(), CurationFilter::Any);
        assert_eq!("uncurated".parse::<CurationFilter>().unwrap(), CurationFilter::Uncurated);
        assert_eq!(
            "hold".parse::<CurationFilter>().unwrap(),
            CurationFilter::Status(CurationStatus::Hold)
        );
        assert!("bogus".parse::<CurationFilter>().is_err());
    }
}
