/// Per-seed progress states
///
/// Every seed walks the same short path: it is rendered, its about links are
/// collected, and either each link or the seed page itself is extracted.
use std::fmt;

/// Represents where a seed is in its crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedState {
    /// Seed is waiting to be rendered
    Seed,

    /// Homepage rendered and ready for link discovery
    Rendered,

    /// At least one about link survived filtering
    AboutCandidatesFound,

    /// About pages are being rendered and extracted one by one
    ExtractEach,

    /// No about link survived filtering
    NoCandidates,

    /// The homepage itself is being extracted
    ExtractSeedItself,

    /// Nothing left to do for this seed
    Done,
}

impl SeedState {
    /// Returns true if no further processing is needed
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Checks whether moving from `self` to `next` is allowed
    pub fn can_transition_to(&self, next: SeedState) -> bool {
        use SeedState::*;

        matches!(
            (self, next),
            (Seed, Rendered)
                | (Seed, Done)
                | (Rendered, AboutCandidatesFound)
                | (Rendered, NoCandidates)
                | (AboutCandidatesFound, ExtractEach)
                | (ExtractEach, Done)
                | (NoCandidates, ExtractSeedItself)
                | (NoCandidates, Done)
                | (ExtractSeedItself, Done)
        )
    }

    /// Moves to `next`, refusing transitions outside the seed lifecycle
    pub fn transition(self, next: SeedState) -> Result<SeedState, crate::CrawlError> {
        if !self.can_transition_to(next) {
            return Err(crate::CrawlError::InvalidTransition {
                from: self,
                to: next,
            });
        }

        tracing::trace!("Seed state {} -> {}", self, next);
        Ok(next)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seed => "seed",
            Self::Rendered => "rendered",
            Self::AboutCandidatesFound => "about_candidates_found",
            Self::ExtractEach => "extract_each",
            Self::NoCandidates => "no_candidates",
            Self::ExtractSeedItself => "extract_seed_itself",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SeedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
