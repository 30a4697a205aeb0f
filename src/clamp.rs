//! Clamp strategies
//!
//! Pluggable policies that force every gene of every individual back into
//! its domain, in place. Genes already within their domain are never
//! touched, so clamping an in-domain population is idempotent.

use crate::domain::VariableDomains;
use crate::population::population::Population;

/// Policy for forcing chromosomes back into their variable domains.
///
/// Postcondition: after `clamp`, every gene value lies within its domain.
pub trait ClampStrategy: Send + Sync {
    /// Force every gene of every individual into its domain, in place
    fn clamp(&self, domains: &VariableDomains, population: &mut Population);
}

/// Hard clip: out-of-domain genes snap to the violated bound
#[derive(Clone, Debug, Default)]
pub struct HardClamp;

impl ClampStrategy for HardClamp {
    fn clamp(&self, domains: &VariableDomains, population: &mut Population) {
        for individual in population.iter_mut() {
            domains.clamp_chromosome(&mut individual.chromosome);
        }
    }
}

/// Reflect: out-of-domain genes fold back across the violated bound
#[derive(Clone, Debug, Default)]
pub struct ReflectClamp;

impl ClampStrategy for ReflectClamp {
    fn clamp(&self, domains: &VariableDomains, population: &mut Population) {
        for individual in population.iter_mut() {
            for (gene, domain) in individual.chromosome.iter_mut().zip(&domains.domains) {
                *gene = domain.reflect(*gene);
            }
        }
    }
}

/// Wrap: out-of-domain genes re-enter modularly from the opposite bound
#[derive(Clone, Debug, Default)]
pub struct WrapClamp;

impl ClampStrategy for WrapClamp {
    fn clamp(&self, domains: &VariableDomains, population: &mut Population) {
        for individual in population.iter_mut() {
            for (gene, domain) in individual.chromosome.iter_mut().zip(&domains.domains) {
                *gene = domain.wrap(*gene);
            }
        }
    }
}
