//! Default evolutionary harness
//!
//! Fixed-topology feed-forward networks evolved by elitism plus weight
//! mutation. Enough to drive training mode without an external
//! neuro-evolution library.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::OBSERVATION_SIZE;
use crate::sim::{Controller, EvolutionHarness};

/// Evolution tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionParams {
    pub population: usize,
    pub hidden: usize,
    /// Top genomes copied unchanged into the next generation
    pub elite: usize,
    /// Chance a single weight is perturbed
    pub mutation_rate: f32,
    /// Largest perturbation applied to a weight
    pub mutation_power: f32,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population: 50,
            hidden: 6,
            elite: 5,
            mutation_rate: 0.2,
            mutation_power: 0.5,
        }
    }
}

/// Observation -> tanh hidden layer -> single sigmoid output
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    hidden: usize,
    /// Hidden weights then biases, output weights then bias
    genes: Vec<f32>,
}

impl Network {
    fn gene_count(hidden: usize) -> usize {
        hidden * OBSERVATION_SIZE + hidden + hidden + 1
    }

    /// Weights drawn uniformly from [-1, 1]
    pub fn random(rng: &mut impl Rng, hidden: usize) -> Self {
        let genes = (0..Self::gene_count(hidden))
            .map(|_| rng.random_range(-1.0..=1.0))
            .collect();
        Self { hidden, genes }
    }

    pub fn genes(&self) -> &[f32] {
        &self.genes
    }

    /// Forward pass; missing inputs read as zero
    pub fn forward(&self, inputs: &[f32]) -> f32 {
        let (hidden_w, rest) = self.genes.split_at(self.hidden * OBSERVATION_SIZE);
        let (hidden_b, rest) = rest.split_at(self.hidden);
        let (out_w, out_b) = rest.split_at(self.hidden);

        let mut sum = out_b[0];
        for h in 0..self.hidden {
            let weights = &hidden_w[h * OBSERVATION_SIZE..(h + 1) * OBSERVATION_SIZE];
            let z: f32 = weights
                .iter()
                .zip(inputs.iter().chain(std::iter::repeat(&0.0)))
                .map(|(w, x)| w * x)
                .sum::<f32>()
                + hidden_b[h];
            sum += out_w[h] * z.tanh();
        }
        1.0 / (1.0 + (-sum).exp())
    }

    /// Perturb each weight with probability `rate` by up to ±`power`
    pub fn mutate(&mut self, rng: &mut impl Rng, rate: f32, power: f32) {
        for gene in &mut self.genes {
            if rng.random::<f32>() < rate {
                *gene += rng.random_range(-power..=power);
            }
        }
    }
}

impl Controller for Network {
    fn activate(&self, inputs: &[f32]) -> Vec<f32> {
        vec![self.forward(inputs)]
    }
}

/// A generation of networks plus the generation counter
#[derive(Debug, Clone)]
pub struct Population {
    pub params: EvolutionParams,
    pub genomes: Vec<Network>,
    generation: u32,
    /// Best fitness seen so far and the network that earned it
    best: Option<(f32, Network)>,
    rng: Pcg32,
}

impl Population {
    pub fn new(params: EvolutionParams, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let genomes = (0..params.population)
            .map(|_| Network::random(&mut rng, params.hidden))
            .collect();
        Self {
            params,
            genomes,
            generation: 0,
            best: None,
            rng,
        }
    }

    pub fn best(&self) -> Option<&(f32, Network)> {
        self.best.as_ref()
    }

    /// Rank by fitness, keep the elite, refill with mutated elite copies
    fn evolve(&mut self, fitness: &[f32]) {
        let mut ranked: Vec<usize> = (0..self.genomes.len().min(fitness.len())).collect();
        ranked.sort_by(|&a, &b| fitness[b].total_cmp(&fitness[a]));
        if ranked.is_empty() {
            return;
        }

        let top = ranked[0];
        if self.best.as_ref().is_none_or(|(f, _)| fitness[top] > *f) {
            self.best = Some((fitness[top], self.genomes[top].clone()));
        }

        let elite = self.params.elite.clamp(1, ranked.len());
        let parents: Vec<Network> = ranked[..elite]
            .iter()
            .map(|&i| self.genomes[i].clone())
            .collect();

        let mut next = parents.clone();
        while next.len() < self.params.population {
            let parent = &parents[self.rng.random_range(0..parents.len())];
            let mut child = parent.clone();
            child.mutate(
                &mut self.rng,
                self.params.mutation_rate,
                self.params.mutation_power,
            );
            next.push(child);
        }
        next.truncate(self.params.population);
        self.genomes = next;
    }
}

impl EvolutionHarness for Population {
    fn generation(&self) -> u32 {
        self.generation
    }

    fn controllers(&mut self) -> Vec<Box<dyn Controller>> {
        self.genomes
            .iter()
            .cloned()
            .map(|n| Box::new(n) as Box<dyn Controller>)
            .collect()
    }

    fn report(&mut self, fitness: &[f32]) {
        self.evolve(fitness);
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::train;

    #[test]
    fn test_output_is_probability() {
        let mut rng = Pcg32::seed_from_u64(1);
        let net = Network::random(&mut rng, 4);
        for inputs in [[0.0; 5], [300.0, -50.0, 120.0, 400.0, 90.0]] {
            let out = net.activate(&inputs);
            assert_eq!(out.len(), 1);
            assert!((0.0..=1.0).contains(&out[0]));
        }
    }

    #[test]
    fn test_zero_rate_mutation_is_noop() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut net = Network::random(&mut rng, 4);
        let before = net.clone();
        net.mutate(&mut rng, 0.0, 1.0);
        assert_eq!(net, before);
    }

    #[test]
    fn test_report_keeps_elite_and_size() {
        let params = EvolutionParams {
            population: 10,
            elite: 2,
            ..Default::default()
        };
        let mut pop = Population::new(params, 3);
        let fitness: Vec<f32> = (0..10).map(|i| i as f32).collect();
        let champion = pop.genomes[9].clone();
        let runner_up = pop.genomes[8].clone();

        pop.report(&fitness);
        assert_eq!(pop.generation(), 1);
        assert_eq!(pop.genomes.len(), 10);
        assert_eq!(pop.genomes[0], champion);
        assert_eq!(pop.genomes[1], runner_up);
        assert_eq!(pop.best().map(|(f, _)| *f), Some(9.0));
    }

    #[test]
    fn test_seeded_population_reproducible() {
        let a = Population::new(EvolutionParams::default(), 77);
        let b = Population::new(EvolutionParams::default(), 77);
        assert_eq!(a.genomes, b.genomes);
    }

    #[test]
    fn test_trains_against_simulation() {
        let params = EvolutionParams {
            population: 8,
            ..Default::default()
        };
        let mut pop = Population::new(params, 5);
        let reports = train(&mut pop, &GameConfig::default(), 5, 2, Some(600));
        assert_eq!(reports.len(), 2);
        assert_eq!(pop.generation(), 2);
        assert!(reports.iter().all(|r| r.fitness.len() == 8));
    }
}
