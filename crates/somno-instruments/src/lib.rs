//! somno-instruments
//!
//! Sleep questionnaire definitions and scoring. Pure data and pure
//! functions: each instrument module defines its typed answers, the
//! validation of those answers, the scoring rule, and the item catalogue
//! a presentation layer renders from.

pub mod error;
pub mod instruments;
pub mod scoring;

use somno_core::models::questionnaire::QuestionnaireKind;

use error::InstrumentError;
use scoring::Item;

/// Trait implemented by each sleep questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "stop_bang", "meq").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "Epworth Sleepiness Scale").
    fn name(&self) -> &str;

    /// Which result slot this instrument fills.
    fn kind(&self) -> QuestionnaireKind;

    /// Instruction shown above the items.
    fn instructions(&self) -> &str;

    /// The questions, in display order.
    fn items(&self) -> &[Item];

    fn item(&self, id: &str) -> Option<&Item> {
        self.items().iter().find(|i| i.id == id)
    }

    /// Format the catalogue as plain text, one item per line.
    fn to_structured_text(&self) -> String {
        let mut output = format!("## {}\n\n{}\n\n", self.name(), self.instructions());
        for item in self.items() {
            output.push_str(&format!("- {}\n", item.prompt));
            for option in &item.options {
                output.push_str(&format!("  {}: {}\n", option.value, option.label));
            }
        }
        output
    }
}

/// Return all registered instruments, in administration order.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::stop_bang::StopBang),
        Box::new(instruments::epworth::Epworth),
        Box::new(instruments::psqi::Psqi),
        Box::new(instruments::meq::Meq),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Like [`get_instrument`], but an unknown ID is an error.
pub fn require_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    get_instrument(id).ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))
}

/// Look up the instrument that fills a given result slot.
pub fn instrument_for(kind: QuestionnaireKind) -> Box<dyn Instrument> {
    match kind {
        QuestionnaireKind::StopBang => Box::new(instruments::stop_bang::StopBang),
        QuestionnaireKind::Epworth => Box::new(instruments::epworth::Epworth),
        QuestionnaireKind::Psqi => Box::new(instruments::psqi::Psqi),
        QuestionnaireKind::Meq => Box::new(instruments::meq::Meq),
    }
}
