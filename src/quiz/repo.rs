use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

/// Inserts one row per answer and marks the quiz completed, atomically.
/// Resubmission appends new rows; old answers are kept.
pub async fn save_answers(
    db: &PgPool,
    user_id: Uuid,
    answers: &[(String, String)],
) -> anyhow::Result<()> {
    let mut tx = db.begin().await.context("begin tx")?;

    for (question_id, answer) in answers {
        sqlx::query(
            r#"
            INSERT INTO quiz_results (user_id, question_id, answer)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(question_id)
        .bind(answer)
        .execute(&mut *tx)
        .await
        .context("insert quiz answer")?;
    }

    let updated = sqlx::query("UPDATE users SET has_completed_quiz = TRUE WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .context("update quiz completion flag")?;
    anyhow::ensure!(updated.rows_affected() == 1, "user {user_id} not found");

    tx.commit().await.context("commit tx")?;
    Ok(())
}

/// All stored answers for a user, oldest first.
pub async fn list_answers(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<(String, String)>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT question_id, answer
          FROM quiz_results
         WHERE user_id = $1
         ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list quiz answers")?;
    Ok(rows)
}
