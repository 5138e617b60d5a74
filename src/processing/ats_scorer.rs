//! ATS (Applicant Tracking System) keyword scoring
//!
//! The job description's recognized technology terms form the scoring
//! universe. A resume scores the share of those terms it mentions, truncated to
//! a whole percent, and a 1-5 star rating derived from that percentage.

use crate::processing::keywords::{extract_normalized_keywords, KeywordExtractor};
use crate::processing::vocabulary::Vocabulary;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Result of scoring one resume against one job description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsScore {
    /// Percentage of the job's technology terms found in the resume (0-100)
    pub ats_score: u8,

    /// Technology terms present in both documents, lower-cased
    pub matched_keywords: Vec<String>,

    /// Technology terms the job asks for that the resume lacks, lower-cased
    pub suggested_keywords: Vec<String>,

    /// Star rating (1-5)
    pub rating: u8,
}

impl AtsScore {
    /// Number of vocabulary terms the job description contributed.
    pub fn job_term_count(&self) -> usize {
        self.matched_keywords.len() + self.suggested_keywords.len()
    }
}

/// A score attached to the resume file it was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub filename: String,
    pub ats_score: u8,
    pub matched_keywords: Vec<String>,
    pub suggested_keywords: Vec<String>,
    pub rating: u8,
}

impl ScoreRecord {
    pub fn new(filename: impl Into<String>, score: AtsScore) -> Self {
        Self {
            filename: filename.into(),
            ats_score: score.ats_score,
            matched_keywords: score.matched_keywords,
            suggested_keywords: score.suggested_keywords,
            rating: score.rating,
        }
    }
}

/// Scorer bound to a vocabulary. Cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct AtsScorer {
    extractor: KeywordExtractor,
    vocabulary: Arc<Vocabulary>,
}

impl AtsScorer {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            extractor: KeywordExtractor::new(),
            vocabulary,
        }
    }

    /// Scorer over the built-in vocabulary.
    pub fn builtin() -> Self {
        Self::new(Arc::new(Vocabulary::builtin().clone()))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn score(&self, resume_text: &str, job_text: &str) -> AtsScore {
        let resume_keywords = self.extractor.extract_normalized(resume_text);
        let job_keywords = self.extractor.extract_normalized(job_text);
        score_keyword_sets(&resume_keywords, &job_keywords, &self.vocabulary)
    }

    pub fn score_document(&self, filename: &str, resume_text: &str, job_text: &str) -> ScoreRecord {
        ScoreRecord::new(filename, self.score(resume_text, job_text))
    }
}

/// Score raw resume text against raw job description text.
pub fn score(resume_text: &str, job_text: &str, vocabulary: &Vocabulary) -> AtsScore {
    let resume_keywords = extract_normalized_keywords(resume_text);
    let job_keywords = extract_normalized_keywords(job_text);
    score_keyword_sets(&resume_keywords, &job_keywords, vocabulary)
}

/// Score two already lower-cased keyword sets.
pub fn score_keyword_sets(
    resume_keywords: &HashSet<String>,
    job_keywords: &HashSet<String>,
    vocabulary: &Vocabulary,
) -> AtsScore {
    let job_tech: BTreeSet<&String> = job_keywords
        .iter()
        .filter(|keyword| vocabulary.lowered().contains(*keyword))
        .collect();

    let (matched, missing): (Vec<&String>, Vec<&String>) = job_tech
        .iter()
        .copied()
        .partition(|keyword| resume_keywords.contains(*keyword));

    let ats_score = match_percentage(matched.len(), job_tech.len());
    let rating = star_rating(ats_score);

    debug!("JD keywords: {:?}", job_keywords);
    debug!("Resume keywords: {:?}", resume_keywords);
    debug!("JD tech keywords: {:?}", job_tech);
    debug!("Matched: {:?}", matched);
    debug!("Missing: {:?}", missing);

    AtsScore {
        ats_score,
        matched_keywords: matched.into_iter().cloned().collect(),
        suggested_keywords: missing.into_iter().cloned().collect(),
        rating,
    }
}

/// `floor(100 * matched / total)`, or 0 when the job has no technology terms.
pub fn match_percentage(matched: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let percentage = (matched.min(total) * 100) / total;
    percentage as u8
}

/// `clamp(round(score / 20), 1, 5)`, rounding halves to the even star count.
pub fn star_rating(score: u8) -> u8 {
    let quotient = score / 20;
    let rounded = match (score % 20).cmp(&10) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient % 2 == 0 => quotient,
        Ordering::Equal => quotient + 1,
    };
    rounded.clamp(MIN_RATING, MAX_RATING)
}
