//! Controlador del formulario de mantenimiento

use validator::Validate;

use crate::models::{CreateMaintenanceRequest, MaintenanceKind, Photo, Vehicle};
use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::validate_not_empty;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceForm {
    pub kind: Option<MaintenanceKind>,
    pub note: String,
    pub photo: Option<Photo>,
}

impl MaintenanceForm {
    /// Validar y separar los campos de texto de la foto opcional
    pub fn validate(
        &self,
        driver_id: i64,
        vehicle: &Vehicle,
    ) -> AppResult<(CreateMaintenanceRequest, Option<Photo>)> {
        let kind = self
            .kind
            .ok_or_else(|| validation_error("Select the maintenance type"))?;

        if validate_not_empty(&self.note).is_err() {
            return Err(validation_error("Describe the problem"));
        }

        if matches!(&self.photo, Some(photo) if photo.bytes.is_empty()) {
            return Err(validation_error("The attached photo is empty"));
        }

        let request = CreateMaintenanceRequest {
            vehicle_id: vehicle.id,
            driver_id,
            kind,
            note: self.note.trim().to_string(),
        };
        request.validate()?;

        Ok((request, self.photo.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::ErrorKind;

    fn vehicle() -> Vehicle {
        Vehicle {
            id: 8,
            name: "Daily".to_string(),
            brand: "Iveco".to_string(),
            plate: "MNO-1010".to_string(),
        }
    }

    #[test]
    fn test_requires_kind_and_note() {
        let form = MaintenanceForm::default();
        assert_eq!(
            form.validate(1, &vehicle()).unwrap_err().user_notice(),
            "Select the maintenance type"
        );

        let form = MaintenanceForm {
            kind: Some(MaintenanceKind::Tires),
            note: "   ".to_string(),
            photo: None,
        };
        assert_eq!(form.validate(1, &vehicle()).unwrap_err().user_notice(), "Describe the problem");
    }

    #[test]
    fn test_note_too_long_is_rejected_by_validator() {
        let form = MaintenanceForm {
            kind: Some(MaintenanceKind::Other),
            note: "x".repeat(1001),
            photo: None,
        };
        assert_eq!(form.validate(1, &vehicle()).unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_photo_is_passed_through() {
        let photo = Photo {
            file_name: "dent.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        };
        let form = MaintenanceForm {
            kind: Some(MaintenanceKind::Bodywork),
            note: "Dent on rear door".to_string(),
            photo: Some(photo.clone()),
        };
        let (request, attached) = form.validate(1, &vehicle()).unwrap();
        assert_eq!(request.kind, MaintenanceKind::Bodywork);
        assert_eq!(request.vehicle_id, 8);
        assert_eq!(attached, Some(photo));
    }
}
