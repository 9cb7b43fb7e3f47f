//! OS-facing half of the CPU monitor: the usage counter and the repeating
//! sampler that feeds the UI queue.

pub mod counter;
pub mod sampler;

pub use counter::{acquire, CpuCounter, SysinfoCounter};
pub use sampler::{spawn_sampler, SamplerHandle, SAMPLE_PERIOD};
