pub mod gemini;

use std::sync::Arc;

use crate::domain::models::Explainer;
use crate::domain::models::ExplainerName;

pub type ExplainerBox = Arc<dyn Explainer + Send + Sync>;

pub struct ExplainerManager {}

impl ExplainerManager {
    pub fn get(name: ExplainerName) -> ExplainerBox {
        match name {
            ExplainerName::Gemini => return Arc::<gemini::Gemini>::default(),
        }
    }
}
