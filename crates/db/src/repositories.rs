pub mod lesson;
pub mod member;
pub mod reservation;

use lessonsync_core::errors::StudioError;

pub(crate) fn sql_err(err: sqlx::Error) -> StudioError {
    StudioError::Database(eyre::Report::new(err))
}
