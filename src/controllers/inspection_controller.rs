//! Controlador del formulario de inspección
//!
//! Máquina de estados de dos etapas. `transition` es una función pura
//! `(estado, evento) -> (estado, resultado)`: no hace red ni pinta nada.
//! El payload final se entrega a quien llama, que es quien lo envía.

use chrono::NaiveDate;

use crate::models::{FuelLevel, TireCondition, TirePosition};
use crate::utils::validation::{validate_date, validate_not_empty, validate_odometer};

/// Etapa actual del formulario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectionStage {
    #[default]
    Stage1,
    Stage2,
}

/// Etapa 1: datos mecánicos y de documentación
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageOneFields {
    pub odometer: String,
    pub oil_change_odometer: String,
    pub oil_change_date: String,
    pub fuel_level: Option<FuelLevel>,
    pub documents_valid: bool,
    pub has_fuel_card: bool,
}

/// Etapa 2: neumáticos y observaciones
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageTwoFields {
    pub front_tire: Option<TireCondition>,
    pub rear_tire: Option<TireCondition>,
    pub spare_tire: Option<TireCondition>,
    pub notes: String,
}

/// Estado completo del formulario
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InspectionState {
    pub stage: InspectionStage,
    pub stage_one: StageOneFields,
    pub stage_two: StageTwoFields,
}

/// Edición de un campo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectionField {
    Odometer(String),
    OilChangeOdometer(String),
    OilChangeDate(String),
    FuelLevel(Option<FuelLevel>),
    DocumentsValid(bool),
    HasFuelCard(bool),
    Tire(TirePosition, Option<TireCondition>),
    Notes(String),
}

impl InspectionField {
    fn stage(&self) -> InspectionStage {
        match self {
            InspectionField::Tire(..) | InspectionField::Notes(_) => InspectionStage::Stage2,
            _ => InspectionStage::Stage1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectionEvent {
    Edit(InspectionField),
    Next,
    Back,
    Submit,
}

/// Payload validado de las dos etapas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionPayload {
    pub odometer: u32,
    pub oil_change_odometer: u32,
    pub oil_change_date: NaiveDate,
    pub fuel_level: Option<FuelLevel>,
    pub documents_valid: bool,
    pub has_fuel_card: bool,
    pub front_tire: TireCondition,
    pub rear_tire: TireCondition,
    pub spare_tire: TireCondition,
    pub notes: Option<String>,
}

impl InspectionPayload {
    /// Neumáticos en el orden en que se envían como items
    pub fn tires(&self) -> [(TirePosition, TireCondition); 3] {
        [
            (TirePosition::Front, self.front_tire),
            (TirePosition::Rear, self.rear_tire),
            (TirePosition::Spare, self.spare_tire),
        ]
    }
}

/// Resultado de aplicar un evento
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Rejected(String),
    Submitted(InspectionPayload),
}

struct StageOneValues {
    odometer: u32,
    oil_change_odometer: u32,
    oil_change_date: NaiveDate,
}

fn validate_stage_one(fields: &StageOneFields) -> Result<StageOneValues, String> {
    let missing: Vec<&str> = [
        ("odometer", &fields.odometer),
        ("oil change odometer", &fields.oil_change_odometer),
        ("oil change date", &fields.oil_change_date),
    ]
    .into_iter()
    .filter(|(_, value)| validate_not_empty(value).is_err())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
        return Err(format!("Fill in the required fields: {}", missing.join(", ")));
    }

    let odometer = validate_odometer(&fields.odometer)
        .map_err(|_| "Odometer must be a whole number of km".to_string())?;
    let oil_change_odometer = validate_odometer(&fields.oil_change_odometer)
        .map_err(|_| "Oil change odometer must be a whole number of km".to_string())?;
    let oil_change_date = validate_date(&fields.oil_change_date)
        .map_err(|_| "Oil change date must be YYYY-MM-DD or DD/MM/YYYY".to_string())?;

    Ok(StageOneValues {
        odometer,
        oil_change_odometer,
        oil_change_date,
    })
}

fn assemble(state: &InspectionState) -> Result<InspectionPayload, String> {
    let tires = &state.stage_two;
    let (front_tire, rear_tire, spare_tire) = match (tires.front_tire, tires.rear_tire, tires.spare_tire) {
        (Some(front), Some(rear), Some(spare)) => (front, rear, spare),
        _ => return Err("Select the condition of the front, rear and spare tires".to_string()),
    };

    let values = validate_stage_one(&state.stage_one)?;
    let notes = tires.notes.trim();

    Ok(InspectionPayload {
        odometer: values.odometer,
        oil_change_odometer: values.oil_change_odometer,
        oil_change_date: values.oil_change_date,
        fuel_level: state.stage_one.fuel_level,
        documents_valid: state.stage_one.documents_valid,
        has_fuel_card: state.stage_one.has_fuel_card,
        front_tire,
        rear_tire,
        spare_tire,
        notes: (!notes.is_empty()).then(|| notes.to_string()),
    })
}

fn apply_edit(state: &mut InspectionState, field: InspectionField) {
    let one = &mut state.stage_one;
    let two = &mut state.stage_two;
    match field {
        InspectionField::Odometer(v) => one.odometer = v,
        InspectionField::OilChangeOdometer(v) => one.oil_change_odometer = v,
        InspectionField::OilChangeDate(v) => one.oil_change_date = v,
        InspectionField::FuelLevel(v) => one.fuel_level = v,
        InspectionField::DocumentsValid(v) => one.documents_valid = v,
        InspectionField::HasFuelCard(v) => one.has_fuel_card = v,
        InspectionField::Tire(TirePosition::Front, v) => two.front_tire = v,
        InspectionField::Tire(TirePosition::Rear, v) => two.rear_tire = v,
        InspectionField::Tire(TirePosition::Spare, v) => two.spare_tire = v,
        InspectionField::Notes(v) => two.notes = v,
    }
}

/// Aplicar un evento al formulario
pub fn transition(mut state: InspectionState, event: InspectionEvent) -> (InspectionState, StepOutcome) {
    match (state.stage, event) {
        (stage, InspectionEvent::Edit(field)) => {
            if field.stage() != stage {
                let msg = match stage {
                    InspectionStage::Stage1 => "Tire fields belong to stage 2",
                    InspectionStage::Stage2 => "Go back to stage 1 to edit this field",
                };
                return (state, StepOutcome::Rejected(msg.to_string()));
            }
            apply_edit(&mut state, field);
            (state, StepOutcome::Continue)
        }
        (InspectionStage::Stage1, InspectionEvent::Next) => match validate_stage_one(&state.stage_one) {
            Ok(_) => {
                state.stage = InspectionStage::Stage2;
                (state, StepOutcome::Continue)
            }
            Err(msg) => (state, StepOutcome::Rejected(msg)),
        },
        (InspectionStage::Stage2, InspectionEvent::Next) => {
            (state, StepOutcome::Rejected("Already on the last stage".to_string()))
        }
        (_, InspectionEvent::Back) => {
            state.stage = InspectionStage::Stage1;
            (state, StepOutcome::Continue)
        }
        (InspectionStage::Stage1, InspectionEvent::Submit) => {
            (state, StepOutcome::Rejected("Complete stage 1 first".to_string()))
        }
        (InspectionStage::Stage2, InspectionEvent::Submit) => match assemble(&state) {
            Ok(payload) => (state, StepOutcome::Submitted(payload)),
            Err(msg) => (state, StepOutcome::Rejected(msg)),
        },
    }
}

impl InspectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Avisos que no bloquean el envío.
    ///
    /// El nivel de combustible no forma parte de la validación de la
    /// etapa 1, así que solo se avisa de que falta.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.stage_one.fuel_level.is_none() {
            warnings.push("Fuel level was not selected".to_string());
        }
        warnings
    }
}
