pub mod carousel;
pub mod chrome;
pub mod config;
pub mod counter;
pub mod form;
pub mod particles;
pub mod task;

pub use carousel::{layout_pills, nearest_pill, PillFrame, PillTreatment, Span};
pub use chrome::{MenuState, NavStyle};
pub use config::{ConfigError, SiteConfig};
pub use counter::{ease_out_quart, format_count, parse_target, CounterAnimation};
pub use form::{CharacterCount, ContactField, ContactSubmission, FieldError, FormState, SubmitError};
pub use particles::{Particle, ParticleField, PARTICLE_COUNT};
pub use task::{FrameTask, TaskStatus};
