use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::AuthUser;
use crate::db;
use crate::db::jobs::CompanyJobRow;
use crate::db::saved::{SavedCandidateRow, SavedJobRow};
use crate::errors::AppError;
use crate::models::application::{ApplicantRow, SeekerApplicationRow};
use crate::models::company::CompanyRow;
use crate::models::job::JobListingRow;
use crate::models::matching::SeekerMatchRow;
use crate::models::offer::OfferSummaryRow;
use crate::models::seeker::SeekerRow;
use crate::models::user::UserType;
use crate::profiles::{require_company, require_seeker};
use crate::state::AppState;

const TOP_MATCHES: i64 = 5;
const RECOMMENDED_JOBS: i64 = 5;
const RECENT_APPLICATIONS: i64 = 5;

#[derive(Serialize)]
#[serde(tag = "user_type", rename_all = "snake_case")]
pub enum Dashboard {
    Seeker {
        profile: SeekerRow,
        top_matches: Vec<SeekerMatchRow>,
        recommended_jobs: Vec<JobListingRow>,
        applications: Vec<SeekerApplicationRow>,
        offers: Vec<OfferSummaryRow>,
        saved_jobs: Vec<SavedJobRow>,
    },
    Company {
        profile: CompanyRow,
        jobs: Vec<CompanyJobRow>,
        recent_applications: Vec<ApplicantRow>,
        offers: Vec<OfferSummaryRow>,
        saved_candidates: Vec<SavedCandidateRow>,
    },
}

/// GET /api/v1/dashboard
///
/// The token's user type picks the dashboard; the profile lookups still
/// answer 403 if the account has no matching profile.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Dashboard>, AppError> {
    let dashboard = match auth.user_type {
        UserType::Seeker => {
            let seeker = require_seeker(&state.db, auth.user_id).await?;
            Dashboard::Seeker {
                top_matches: db::matches::list_for_seeker(&state.db, seeker.id, TOP_MATCHES)
                    .await?,
                recommended_jobs: db::jobs::recommended_jobs(&state.db, seeker.id, RECOMMENDED_JOBS)
                    .await?,
                applications: db::applications::list_for_seeker(&state.db, seeker.id).await?,
                offers: db::offers::list_for_seeker(&state.db, seeker.id).await?,
                saved_jobs: db::saved::list_saved_jobs(&state.db, seeker.id).await?,
                profile: seeker,
            }
        }
        UserType::Company => {
            let company = require_company(&state.db, auth.user_id).await?;
            Dashboard::Company {
                jobs: db::jobs::list_company_jobs(&state.db, company.id).await?,
                recent_applications: db::applications::recent_for_company(
                    &state.db,
                    company.id,
                    RECENT_APPLICATIONS,
                )
                .await?,
                offers: db::offers::list_for_company(&state.db, company.id).await?,
                saved_candidates: db::saved::list_saved_candidates(&state.db, company.id).await?,
                profile: company,
            }
        }
    };

    Ok(Json(dashboard))
}
