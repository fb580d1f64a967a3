/// The row came back but did not fit the expected shape.
pub fn is_decode_error(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::Decode(_)
            | sqlx::Error::TypeNotFound { .. }
    )
}

pub fn is_timeout(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::PoolTimedOut)
}
