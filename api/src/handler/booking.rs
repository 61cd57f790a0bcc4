use axum::{
    extract::{Path, State},
    Json,
};
use garde::Validate;
use kernel::model::id::BookingId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::booking::{BookedResponse, BookingResponse, CreateBookingRequest, UpdateBookingRequest},
};

pub async fn show_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_service()
        .get_booking(user.id())
        .await
        .map(BookingResponse::from)
        .map(Json)
}

pub async fn register_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<Json<BookedResponse>> {
    req.validate(&())?;
    let room_id = req
        .room_id
        .ok_or_else(|| AppError::InvalidRequest("roomId is required".into()))?;

    registry
        .booking_service()
        .book_room(user.id(), room_id)
        .await
        .map(BookedResponse::from)
        .map(Json)
}

pub async fn update_booking(
    user: AuthorizedUser,
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateBookingRequest>,
) -> AppResult<Json<BookedResponse>> {
    req.validate(&())?;
    let room_id = req
        .room_id
        .ok_or_else(|| AppError::InvalidRequest("roomId is required".into()))?;

    registry
        .booking_service()
        .change_room(user.id(), booking_id, room_id)
        .await
        .map(BookedResponse::from)
        .map(Json)
}
