/// Raw assembly input as three index-correlated sequences.
///
/// Experiment `i` is made of `samples[i]`, `reagents[i]` and `replicates[i]`.
/// The sequences are kept separate so that inputs of unequal length can still be
/// represented and rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyInput {
    pub samples: Vec<Vec<String>>,
    pub reagents: Vec<Vec<String>>,
    pub replicates: Vec<usize>,
}

/// A borrowed view of one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experiment<'a> {
    pub index: usize,
    pub samples: &'a [String],
    pub reagents: &'a [String],
    pub replicates: usize,
}

impl AssemblyInput {
    pub fn new(
        samples: Vec<Vec<String>>,
        reagents: Vec<Vec<String>>,
        replicates: Vec<usize>,
    ) -> Self {
        Self {
            samples,
            reagents,
            replicates,
        }
    }

    pub fn push_experiment<S, R>(&mut self, samples: S, reagents: R, replicates: usize)
    where
        S: IntoIterator,
        S::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        self.samples.push(samples.into_iter().map(Into::into).collect());
        self.reagents.push(reagents.into_iter().map(Into::into).collect());
        self.replicates.push(replicates);
    }

    pub fn with_experiment<S, R>(mut self, samples: S, reagents: R, replicates: usize) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        self.push_experiment(samples, reagents, replicates);
        self
    }

    pub fn lengths_match(&self) -> bool {
        self.samples.len() == self.reagents.len() && self.reagents.len() == self.replicates.len()
    }

    /// Experiments in input order. Stops at the shortest of the three sequences.
    pub fn experiments(&self) -> impl Iterator<Item = Experiment<'_>> {
        self.samples
            .iter()
            .zip(&self.reagents)
            .zip(&self.replicates)
            .enumerate()
            .map(|(index, ((samples, reagents), &replicates))| Experiment {
                index,
                samples,
                reagents,
                replicates,
            })
    }

    /// Total wells demanded: the sum of `samples × reagents × replicates`.
    ///
    /// Saturates at `usize::MAX` instead of overflowing.
    pub fn required_wells(&self) -> usize {
        self.experiments().fold(0usize, |total, exp| {
            let wells = exp
                .samples
                .len()
                .saturating_mul(exp.reagents.len())
                .saturating_mul(exp.replicates);
            total.saturating_add(wells)
        })
    }
}
