use crate::error::{AppError, AppResult};
use crate::models::{
    CreateReservation, ReservationDetail, UpdateReservation, RESERVATION_STATUS_ACTIVE,
};
use crate::repositories::{EquipmentRepository, ReservationRepository};
use crate::services::interval::Interval;
use crate::state::AppState;

/// Reservation lifecycle: create, update, delete with the no-double-booking
/// invariant and ownership rules enforced before any write.
///
/// The conflict check and the write that follows it run under the state's
/// booking lock; without it, two overlapping requests could both pass the
/// check before either persists.
pub struct ReservationService;

impl ReservationService {
    /// Create a reservation owned by the authenticated caller.
    pub async fn create(
        state: &AppState,
        user_id: i64,
        input: CreateReservation,
    ) -> AppResult<ReservationDetail> {
        let proposed = Interval::new(input.start_time, input.end_time);
        if !proposed.is_well_formed() {
            return Err(AppError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }

        let _booking = state.booking_lock.lock().await;

        if !EquipmentRepository::exists(&state.db, input.equipment_id).await? {
            return Err(AppError::NotFound("Equipment".to_string()));
        }

        let conflicts =
            ReservationRepository::find_conflicts(&state.db, input.equipment_id, &proposed, None)
                .await?;
        if !conflicts.is_empty() {
            return Err(AppError::Conflict(
                "Reservation conflicts with existing reservations".to_string(),
            ));
        }

        let created = ReservationRepository::create(&state.db, user_id, &input).await?;
        drop(_booking);

        ReservationRepository::find_detailed(&state.db, created.id).await
    }

    /// Update fields of a reservation; times are re-validated against the
    /// effective interval, excluding the reservation itself.
    pub async fn update(
        state: &AppState,
        id: i64,
        caller_user_id: i64,
        input: UpdateReservation,
    ) -> AppResult<ReservationDetail> {
        let existing = ReservationRepository::find_by_id(&state.db, id).await?;

        if existing.user_id != caller_user_id {
            return Err(AppError::Forbidden(
                "Not authorized to update this reservation".to_string(),
            ));
        }

        if input.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }

        // Unchanged fields keep their stored values
        let time_change = input.start_time.is_some() || input.end_time.is_some();
        let effective = Interval::new(
            input.start_time.unwrap_or(existing.start_time),
            input.end_time.unwrap_or(existing.end_time),
        );
        if time_change && !effective.is_well_formed() {
            return Err(AppError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }

        // The result of the update holds an active window when the effective
        // status is active. That window must be conflict-checked if it moved,
        // or if a previously inactive reservation is being reactivated into
        // a window that may have been rebooked since.
        let effective_active = match input.status.as_deref() {
            Some(status) => status == RESERVATION_STATUS_ACTIVE,
            None => existing.is_active(),
        };
        let reactivating = effective_active && !existing.is_active();

        if effective_active && (time_change || reactivating) {
            let _booking = state.booking_lock.lock().await;

            let conflicts = ReservationRepository::find_conflicts(
                &state.db,
                existing.equipment_id,
                &effective,
                Some(id),
            )
            .await?;
            if !conflicts.is_empty() {
                return Err(AppError::Conflict(
                    "Reservation conflicts with existing reservations".to_string(),
                ));
            }

            ReservationRepository::update(&state.db, id, &input).await?;
        } else {
            // Nothing newly active to re-check (cancellation, or a move of
            // an already-cancelled window)
            ReservationRepository::update(&state.db, id, &input).await?;
        }

        ReservationRepository::find_detailed(&state.db, id).await
    }

    /// Delete a reservation owned by the caller (hard delete).
    pub async fn delete(state: &AppState, id: i64, caller_user_id: i64) -> AppResult<()> {
        let existing = ReservationRepository::find_by_id(&state.db, id).await?;

        if existing.user_id != caller_user_id {
            return Err(AppError::Forbidden(
                "Not authorized to delete this reservation".to_string(),
            ));
        }

        ReservationRepository::delete(&state.db, id).await
    }
}
