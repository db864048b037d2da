//! Sample axes of posterior draw arrays.

/// Trailing sample axes of a Bayesian value: draws, then optionally chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleLayout {
    draws: usize,
    chains: Option<usize>,
}

impl SampleLayout {
    /// Layout with a single trailing draw axis.
    #[must_use]
    pub const fn flat(draws: usize) -> Self {
        Self {
            draws,
            chains: None,
        }
    }

    /// Layout with a draw axis followed by a chain axis.
    #[must_use]
    pub const fn chained(draws: usize, chains: usize) -> Self {
        Self {
            draws,
            chains: Some(chains),
        }
    }

    /// Number of draws per chain.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.draws
    }

    /// Number of chains (1 for a flat layout).
    #[must_use]
    pub const fn chains(&self) -> usize {
        match self.chains {
            Some(c) => c,
            None => 1,
        }
    }

    /// Returns true if the value carries a chain axis.
    #[must_use]
    pub const fn is_chained(&self) -> bool {
        self.chains.is_some()
    }

    /// Number of trailing sample axes (1 or 2).
    #[must_use]
    pub const fn axes(&self) -> usize {
        if self.is_chained() { 2 } else { 1 }
    }

    /// Total number of draws across chains.
    #[must_use]
    pub const fn num_samples(&self) -> usize {
        self.draws * self.chains()
    }

    /// Lengths of the sample axes.
    #[must_use]
    pub fn dims(&self) -> Vec<usize> {
        match self.chains {
            Some(c) => vec![self.draws, c],
            None => vec![self.draws],
        }
    }

    /// Flat position of `index`, chain-major; None if out of range.
    #[must_use]
    pub const fn flat_index(&self, index: SampleIndex) -> Option<usize> {
        if index.draw < self.draws && index.chain < self.chains() {
            Some(index.chain * self.draws + index.draw)
        } else {
            None
        }
    }

    /// Inverse of [`Self::flat_index`].
    #[must_use]
    pub const fn sample_index(&self, flat: usize) -> SampleIndex {
        let draws = if self.draws == 0 { 1 } else { self.draws };
        SampleIndex {
            draw: flat % draws,
            chain: flat / draws,
        }
    }
}

impl std::fmt::Display for SampleLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.chains {
            Some(c) => write!(f, "{} draws x {} chains", self.draws, c),
            None => write!(f, "{} draws", self.draws),
        }
    }
}

/// Selects one posterior draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SampleIndex {
    /// Position along the draw axis.
    pub draw: usize,
    /// Position along the chain axis (0 for flat layouts).
    pub chain: usize,
}

impl SampleIndex {
    /// Creates a sample index.
    #[must_use]
    pub const fn new(draw: usize, chain: usize) -> Self {
        Self { draw, chain }
    }

    /// Index of `draw` in the first chain.
    #[must_use]
    pub const fn draw(draw: usize) -> Self {
        Self { draw, chain: 0 }
    }
}
