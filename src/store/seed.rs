//! Demo content for local runs and previews.

use super::Stores;
use crate::core::Result;
use crate::model::{
    CommentDraft, CommentStatus, NewsDraft, ProjectDraft, ProjectStatus, PublicationDraft,
};
use chrono::{NaiveDate, TimeZone, Utc};
use tracing::info;

/// Fills empty stores with one project, one publication and one news
/// article carrying two comments (one approved, one awaiting moderation).
pub async fn load_demo(stores: &Stores) -> Result<()> {
    stores
        .projects
        .create(
            (),
            ProjectDraft {
                title: "Cancer Imaging Biomarkers".to_string(),
                description: "Quantitative MRI markers for early treatment response.".to_string(),
                period: "2021-2024".to_string(),
                funding_source: Some("NIH Grant".to_string()),
                status: ProjectStatus::Ongoing,
                researchers: "Dr. Smith, Dr. Johnson".to_string(),
            },
        )
        .await?;

    stores
        .publications
        .create(
            (),
            PublicationDraft {
                title: "Self-supervised segmentation of sparse annotations".to_string(),
                authors: "A. Smith, B. Johnson".to_string(),
                venue: "MICCAI".to_string(),
                year: Some(2023),
                url: Some("https://example.com/papers/segmentation.pdf".to_string()),
            },
        )
        .await?;

    let article = stores
        .news
        .create(
            (),
            NewsDraft {
                title: "Lab receives new research award".to_string(),
                summary: "Funding secured for the next three years.".to_string(),
                content: "We are happy to announce a new award supporting our imaging work."
                    .to_string(),
                published_at: NaiveDate::from_ymd_opt(2024, 3, 18),
            },
        )
        .await?;
    let news_id = article.entity.id;

    let seeded_comments = [
        (
            "John Doe",
            "john@example.com",
            "This is a great article! Very informative.",
            (10, 0),
            CommentStatus::Approved,
        ),
        (
            "Jane Smith",
            "jane@example.com",
            "I have a question about the research methodology.",
            (11, 30),
            CommentStatus::Pending,
        ),
    ];

    for (name, email, content, (hour, minute), status) in seeded_comments {
        let created = stores
            .comments
            .create(
                news_id,
                CommentDraft {
                    author_name: name.to_string(),
                    author_email: email.to_string(),
                    content: content.to_string(),
                },
            )
            .await?;

        let mut comment = created.entity;
        if let Some(created_at) = Utc.with_ymd_and_hms(2024, 3, 20, hour, minute, 0).single() {
            comment.created_at = created_at;
        }
        comment.status = status;
        stores
            .comments
            .replace(&news_id, comment.id, comment, None)
            .await?;
    }

    info!(%news_id, "demo content loaded");
    Ok(())
}
