//! Menú interactivo del conductor
//!
//! Cada opción del menú delega en un servicio. Los errores se muestran
//! con su aviso para el usuario y el menú sigue funcionando.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use colored::*;
use tracing::warn;

use fleet_driver::client::FleetGateway;
use fleet_driver::controllers::{
    transition, FuelUpForm, InspectionEvent, InspectionField, InspectionStage, InspectionState,
    MaintenanceForm, NewTripForm, StepOutcome,
};
use fleet_driver::models::{
    FuelLevel, FuelType, HasStatusColor, MaintenanceKind, StatusColor, TireCondition, TirePosition,
    Trip,
};
use fleet_driver::services::{
    load_photo, qr_service, require_vehicle, AuthService, Coordinates, FuelService,
    HistoryService, InspectionService, LocationProvider, MaintenanceService, Permission,
    TripService, VehicleResolver,
};
use fleet_driver::state::SessionStore;
use fleet_driver::utils::errors::{AppError, AppResult};

fn prompt(label: &str) -> AppResult<String> {
    print!("{}", label.bright_yellow());
    io::stdout()
        .flush()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn confirm(label: &str) -> AppResult<bool> {
    let answer = prompt(&format!("{} (s/n): ", label))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí" | "y" | "yes"))
}

/// Elegir una opción de una lista numerada; vacío significa "sin valor"
fn choose<T: Copy>(label: &str, options: &[T], name: impl Fn(&T) -> &'static str) -> AppResult<Option<T>> {
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, name(option));
    }
    let answer = prompt(&format!("{} (1-{}, vacío para ninguno): ", label, options.len()))?;
    if answer.trim().is_empty() {
        return Ok(None);
    }
    answer
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i).copied())
        .map(Some)
        .ok_or_else(|| AppError::Validation("Option out of range".to_string()))
}

fn header(title: &str) {
    println!();
    println!("{}", title.bright_cyan().bold());
    println!("{}", "=".repeat(title.chars().count()).bright_cyan());
}

fn paint(text: &str, color: StatusColor) -> ColoredString {
    match color {
        StatusColor::Green => text.bright_green(),
        StatusColor::Amber => text.bright_yellow(),
        StatusColor::Red => text.bright_red(),
        StatusColor::Grey => text.bright_black(),
    }
}

/// Posición tecleada por el conductor; una línea vacía equivale a denegar el permiso
pub struct PromptLocation;

#[async_trait]
impl LocationProvider for PromptLocation {
    async fn current_position(&self) -> AppResult<Coordinates> {
        let answer = prompt("📍 Posición actual 'lat,lon' (vacío para denegar): ")?;
        let Some((lat, lon)) = answer.split_once(',') else {
            return Err(AppError::PermissionDenied("Location permission denied".to_string()));
        };
        let latitude = lat.trim().parse::<f64>();
        let longitude = lon.trim().parse::<f64>();
        match (latitude, longitude) {
            (Ok(latitude), Ok(longitude)) => Coordinates::new(latitude, longitude),
            _ => Err(AppError::Validation(format!("Invalid position '{}'", answer))),
        }
    }
}

pub struct Shell {
    session: SessionStore,
    auth: AuthService,
    resolver: VehicleResolver,
    trips: TripService,
    fuel: FuelService,
    inspections: InspectionService,
    maintenance: MaintenanceService,
    history: HistoryService,
}

impl Shell {
    pub fn new(gateway: Arc<dyn FleetGateway>, session: SessionStore, trips: TripService) -> Self {
        Self {
            auth: AuthService::new(gateway.clone(), session.clone()),
            resolver: VehicleResolver::new(gateway.clone(), session.clone()),
            fuel: FuelService::new(gateway.clone(), session.clone()),
            inspections: InspectionService::new(gateway.clone(), session.clone()),
            maintenance: MaintenanceService::new(gateway.clone(), session.clone()),
            history: HistoryService::new(gateway, session.clone()),
            trips,
            session,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("{}", "🚚 Fleet Driver".bright_blue().bold());
        println!("{}", "=====================================".bright_blue());

        match self.auth.restore().await? {
            Some(session) => println!("{}", format!("👋 Hola de nuevo, {}", session.display_name()).bright_green()),
            None => self.login().await?,
        }

        loop {
            self.print_menu();
            let choice = prompt("Selecciona una opción: ")?;
            let result = match choice.trim() {
                "1" => self.select_vehicle().await,
                "2" => self.show_qr(),
                "3" => self.new_trip().await,
                "4" => self.close_trip(false).await,
                "5" => self.close_trip(true).await,
                "6" => self.fuel_up().await,
                "7" => self.inspection().await,
                "8" => self.maintenance_request().await,
                "9" => self.show_lists().await,
                "0" => {
                    self.auth.logout().await?;
                    println!("{}", "👋 ¡Hasta luego!".bright_green());
                    break;
                }
                _ => {
                    println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                    continue;
                }
            };

            if let Err(e) = result {
                self.report(&e).await?;
            }
        }

        Ok(())
    }

    fn print_menu(&self) {
        header("📋 MENÚ PRINCIPAL");
        match self.resolver.current() {
            Some(vehicle) => println!("🚗 Vehículo: {}", vehicle.label().as_str().bright_white().bold()),
            None => println!("{}", "🚗 Ningún vehículo seleccionado".bright_black()),
        }
        println!("1. 🔍 Seleccionar vehículo");
        println!("2. 🔲 Mostrar QR del vehículo");
        println!("3. 🛣️  Nuevo viaje");
        println!("4. 🏁 Finalizar viaje");
        println!("5. ✖️  Cancelar viaje");
        println!("6. ⛽ Repostaje");
        println!("7. 📝 Inspección");
        println!("8. 🔧 Solicitud de mantenimiento");
        println!("9. 📜 Historial");
        println!("0. 🚪 Cerrar sesión y salir");
    }

    async fn report(&mut self, error: &AppError) -> anyhow::Result<()> {
        error.log("shell");
        println!("{}", format!("❌ {}", error.user_notice()).bright_red());

        if matches!(error, AppError::Unauthorized(_)) {
            self.session.clear().await?;
            self.resolver.clear_current();
            self.login().await?;
        }
        Ok(())
    }

    async fn login(&mut self) -> anyhow::Result<()> {
        header("🔐 INICIAR SESIÓN");
        loop {
            let username = prompt("Usuario: ")?;
            let password = prompt("Contraseña: ")?;
            match self.auth.login(&username, &password).await {
                Ok(session) => {
                    println!("{}", format!("✅ Bienvenido, {}", session.display_name()).bright_green());
                    return Ok(());
                }
                Err(e) => {
                    e.log("login");
                    println!("{}", format!("❌ {}", e.user_notice()).bright_red());
                }
            }
        }
    }

    async fn select_vehicle(&mut self) -> AppResult<()> {
        header("🔍 SELECCIONAR VEHÍCULO");
        println!("1. Teclear matrícula");
        println!("2. Pegar código QR escaneado");
        println!("3. Vehículos recientes");
        let vehicle = match prompt("Opción: ")?.trim() {
            "1" => {
                let plate = prompt("Matrícula: ")?;
                self.resolver.set_manual_entry(&plate);
                self.resolver.lookup_plate().await?
            }
            "2" => {
                if self.resolver.camera_permission().is_none() {
                    let permission = if confirm("¿Permitir acceso a la cámara?")? {
                        Permission::Granted
                    } else {
                        Permission::Denied
                    };
                    self.resolver.set_camera_permission(permission);
                }
                let payload = prompt("Contenido del QR: ")?;
                let vehicle = self.resolver.scan(&payload)?;
                self.resolver.resume_scanner();
                vehicle
            }
            "3" => {
                let recent = self.resolver.load_recent().await?;
                if recent.is_empty() {
                    println!("{}", "⚠️ No hay vehículos recientes".bright_yellow());
                    return Ok(());
                }
                for (i, vehicle) in recent.iter().enumerate() {
                    println!("  {}. {}", i + 1, vehicle.label());
                }
                let index = prompt("Número: ")?
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .unwrap_or(usize::MAX);
                self.resolver.select_recent(index)?
            }
            _ => return Err(AppError::Validation("Unknown option".to_string())),
        };

        println!("{}", format!("✅ Vehículo seleccionado: {}", vehicle.label()).bright_green());
        Ok(())
    }

    fn show_qr(&self) -> AppResult<()> {
        let vehicle = require_vehicle(self.resolver.current())?;
        header("🔲 CÓDIGO QR");
        println!("{}", qr_service::render_terminal(vehicle)?);
        println!("{}", vehicle.label().as_str().bright_white().bold());
        Ok(())
    }

    async fn new_trip(&mut self) -> AppResult<()> {
        require_vehicle(self.resolver.current())?;
        self.trips.ensure_can_open_trip().await?;

        header("🛣️  NUEVO VIAJE");
        let form = NewTripForm {
            odometer_start: prompt("Odómetro de salida (km): ")?,
            origin: prompt("Origen: ")?,
            destination: prompt("Destino: ")?,
            purpose: prompt("Motivo (opcional): ")?,
            fuel_level: choose("Nivel de combustible", &FuelLevel::ALL, FuelLevel::as_str)?,
        };

        let created = self.trips.create_trip(&form, self.resolver.current()).await?;
        println!(
            "{}",
            format!("✅ Viaje {} abierto: {} -> {}", created.trip.id, created.trip.origin, created.trip.destination)
                .bright_green()
        );
        if let Some(address) = &created.trip.departure_address {
            println!("📍 {}", address);
        }
        if let Some(notice) = created.notice {
            println!("{}", format!("ℹ️  {}", notice).bright_yellow());
        }
        Ok(())
    }

    async fn pick_open_trip(&self) -> AppResult<Option<Trip>> {
        let mut open = self.trips.open_trips().await?;
        if open.is_empty() {
            println!("{}", "⚠️ No tienes viajes abiertos".bright_yellow());
            return Ok(None);
        }
        Ok(Some(open.remove(0)))
    }

    async fn close_trip(&mut self, cancel: bool) -> AppResult<()> {
        let Some(trip) = self.pick_open_trip().await? else {
            return Ok(());
        };

        header(if cancel { "✖️  CANCELAR VIAJE" } else { "🏁 FINALIZAR VIAJE" });
        println!("Viaje {}: {} -> {} (salida {} km)", trip.id, trip.origin, trip.destination, trip.odometer_start);

        let closed = if cancel {
            let reason = prompt("Motivo de la cancelación: ")?;
            self.trips.cancel_trip(&trip, &reason).await?
        } else {
            let arrival = prompt("Odómetro de llegada (km): ")?;
            self.trips.finish_trip(&trip, &arrival).await?
        };

        let mut message = format!("✅ Viaje {} {}", closed.id, closed.status.as_str());
        if let Some(distance) = closed.distance_km {
            message.push_str(&format!(" ({} km)", distance));
        }
        println!("{}", message.bright_green());
        Ok(())
    }

    async fn fuel_up(&mut self) -> AppResult<()> {
        require_vehicle(self.resolver.current())?;
        header("⛽ REPOSTAJE");
        let form = FuelUpForm {
            liters: prompt("Litros: ")?,
            fuel_type: choose("Combustible", &FuelType::ALL, FuelType::as_str)?,
            odometer: prompt("Odómetro (km): ")?,
        };

        let fuel_up = self.fuel.register(&form, self.resolver.current()).await?;
        println!("{}", format!("✅ Repostaje {} registrado", fuel_up.id).bright_green());
        Ok(())
    }

    async fn inspection(&mut self) -> AppResult<()> {
        require_vehicle(self.resolver.current())?;
        let mut state = InspectionState::new();

        let payload = loop {
            let events = match state.stage {
                InspectionStage::Stage1 => {
                    header("📝 INSPECCIÓN (1/2)");
                    vec![
                        InspectionEvent::Edit(InspectionField::Odometer(prompt("Odómetro (km): ")?)),
                        InspectionEvent::Edit(InspectionField::OilChangeOdometer(prompt(
                            "Km del último cambio de aceite: ",
                        )?)),
                        InspectionEvent::Edit(InspectionField::OilChangeDate(prompt(
                            "Fecha del cambio de aceite (AAAA-MM-DD): ",
                        )?)),
                        InspectionEvent::Edit(InspectionField::FuelLevel(choose(
                            "Nivel de combustible",
                            &FuelLevel::ALL,
                            FuelLevel::as_str,
                        )?)),
                        InspectionEvent::Edit(InspectionField::DocumentsValid(confirm("¿Documentación en regla?")?)),
                        InspectionEvent::Edit(InspectionField::HasFuelCard(confirm("¿Lleva tarjeta de combustible?")?)),
                        InspectionEvent::Next,
                    ]
                }
                InspectionStage::Stage2 => {
                    header("📝 INSPECCIÓN (2/2)");
                    for warning in state.warnings() {
                        println!("{}", format!("⚠️ {}", warning).bright_yellow());
                    }
                    if confirm("¿Volver a la etapa 1?")? {
                        vec![InspectionEvent::Back]
                    } else {
                        let mut events = Vec::new();
                        for (position, label) in [
                            (TirePosition::Front, "Neumáticos delanteros"),
                            (TirePosition::Rear, "Neumáticos traseros"),
                            (TirePosition::Spare, "Rueda de repuesto"),
                        ] {
                            let condition = choose(label, &TireCondition::ALL, TireCondition::as_str)?;
                            events.push(InspectionEvent::Edit(InspectionField::Tire(position, condition)));
                        }
                        events.push(InspectionEvent::Edit(InspectionField::Notes(prompt("Observaciones: ")?)));
                        events.push(InspectionEvent::Submit);
                        events
                    }
                }
            };

            let mut submitted = None;
            for event in events {
                let (next, outcome) = transition(state, event);
                state = next;
                match outcome {
                    StepOutcome::Continue => {}
                    StepOutcome::Rejected(reason) => {
                        println!("{}", format!("❌ {}", reason).bright_red());
                        break;
                    }
                    StepOutcome::Submitted(payload) => submitted = Some(payload),
                }
            }

            if let Some(payload) = submitted {
                break payload;
            }
            if !confirm("¿Seguir con la inspección?")? {
                warn!("⚠️ Inspección abandonada por el conductor");
                return Ok(());
            }
        };

        let inspection = self.inspections.submit(&payload, self.resolver.current()).await?;
        println!("{}", format!("✅ Inspección {} registrada", inspection.id).bright_green());
        Ok(())
    }

    async fn maintenance_request(&mut self) -> AppResult<()> {
        require_vehicle(self.resolver.current())?;
        header("🔧 SOLICITUD DE MANTENIMIENTO");
        let kind = choose("Tipo", &MaintenanceKind::ALL, MaintenanceKind::as_str)?;
        let note = prompt("Descripción del problema: ")?;
        let photo_path = prompt("Ruta de la foto (opcional): ")?;
        let photo = match photo_path.trim() {
            "" => None,
            path => Some(load_photo(Path::new(path)).await?),
        };

        let form = MaintenanceForm { kind, note, photo };
        let request = self.maintenance.submit(&form, self.resolver.current()).await?;
        println!("{}", format!("✅ Solicitud {} enviada", request.id).bright_green());
        Ok(())
    }

    async fn show_lists(&mut self) -> AppResult<()> {
        header("📜 HISTORIAL");
        println!("1. Viajes");
        println!("2. Inspecciones");
        println!("3. Historial completo");
        match prompt("Opción: ")?.trim() {
            "1" => {
                for trip in self.trips.load_trips().await? {
                    let line = format!(
                        "#{} {} -> {} [{}]",
                        trip.id,
                        trip.origin,
                        trip.destination,
                        trip.status.as_str()
                    );
                    println!("{}", paint(&line, trip.status_color()));
                }
            }
            "2" => {
                for inspection in self.history.load_inspections().await? {
                    let line = format!(
                        "#{} {} km, aceite {} [{:?}]",
                        inspection.id, inspection.odometer, inspection.oil_change_date, inspection.status
                    );
                    println!("{}", paint(&line, inspection.status_color()));
                }
            }
            "3" => {
                for entry in self.history.load_history().await? {
                    let when = entry
                        .created_at
                        .map(|t| t.format("%d/%m/%Y %H:%M").to_string())
                        .unwrap_or_default();
                    let line = format!(
                        "{} {:?} {} {} [{}]",
                        when,
                        entry.kind,
                        entry.vehicle_plate.as_deref().unwrap_or("-"),
                        entry.description,
                        entry.status
                    );
                    println!("{}", paint(&line, entry.status_color()));
                }
            }
            _ => return Err(AppError::Validation("Unknown option".to_string())),
        }
        Ok(())
    }
}
