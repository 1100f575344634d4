//! Public content sections
//!
//! Read-only fetches backing the public site: news, tenders, partners and
//! programs. Every section is loaded on its own; there is no shared cache, so
//! two sections showing the same collection each issue their own request.

use serde::Serialize;

use crate::api::{ApiClient, ApiError};
use crate::models::{NewsItem, Partner, PartnerType, Program, ProgramDetails, ProgramType, Tender};

#[derive(Serialize)]
struct ProgramQuery {
    #[serde(rename = "type")]
    kind: ProgramType,
}

/// Partners split by kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartnerGroups {
    pub national: Vec<Partner>,
    pub international: Vec<Partner>,
}

impl PartnerGroups {
    pub fn split(partners: Vec<Partner>) -> Self {
        let (national, international) = partners
            .into_iter()
            .partition(|p| p.kind == PartnerType::National);
        Self {
            national,
            international,
        }
    }

    pub fn of(&self, kind: PartnerType) -> &[Partner] {
        match kind {
            PartnerType::National => &self.national,
            PartnerType::International => &self.international,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ContentService {
    client: ApiClient,
}

impl ContentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn news(&self) -> Result<Vec<NewsItem>, ApiError> {
        self.client.get("/news").await
    }

    pub async fn tenders(&self) -> Result<Vec<Tender>, ApiError> {
        self.client.get("/tenders").await
    }

    pub async fn partners(&self) -> Result<PartnerGroups, ApiError> {
        let partners: Vec<Partner> = self.client.get("/partners").await?;
        Ok(PartnerGroups::split(partners))
    }

    /// Programs of one kind, filtered by the backend
    pub async fn programs(&self, kind: ProgramType) -> Result<Vec<Program>, ApiError> {
        self.client
            .get_query("/programs", &ProgramQuery { kind })
            .await
    }

    /// Full description of a single program
    pub async fn program_details(&self, id: i64) -> Result<ProgramDetails, ApiError> {
        self.client.get(&format!("/programs/{}", id)).await
    }
}

/// Every public section, each loaded independently.
#[derive(Debug)]
pub struct HomeContent {
    pub news: Result<Vec<NewsItem>, ApiError>,
    pub tenders: Result<Vec<Tender>, ApiError>,
    pub partners: Result<PartnerGroups, ApiError>,
    pub faculties: Result<Vec<Program>, ApiError>,
    pub professional_courses: Result<Vec<Program>, ApiError>,
}

impl HomeContent {
    /// Issue all section requests concurrently. One section failing does not
    /// affect the others.
    pub async fn load(content: &ContentService) -> Self {
        let (news, tenders, partners, faculties, professional_courses) = futures::join!(
            content.news(),
            content.tenders(),
            content.partners(),
            content.programs(ProgramType::Faculty),
            content.programs(ProgramType::ProfessionalCourse),
        );

        Self {
            news,
            tenders,
            partners,
            faculties,
            professional_courses,
        }
    }

    pub fn news_or_empty(&self) -> &[NewsItem] {
        or_empty("news", &self.news)
    }

    pub fn tenders_or_empty(&self) -> &[Tender] {
        or_empty("tenders", &self.tenders)
    }

    pub fn partners_or_empty(&self, kind: PartnerType) -> &[Partner] {
        match &self.partners {
            Ok(groups) => groups.of(kind),
            Err(e) => {
                tracing::warn!(section = "partners", error = %e, "Section unavailable");
                &[]
            }
        }
    }

    pub fn programs_or_empty(&self, kind: ProgramType) -> &[Program] {
        match kind {
            ProgramType::Faculty => or_empty("faculties", &self.faculties),
            ProgramType::ProfessionalCourse => {
                or_empty("professional_courses", &self.professional_courses)
            }
        }
    }
}

fn or_empty<'a, T>(section: &str, result: &'a Result<Vec<T>, ApiError>) -> &'a [T] {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(section, error = %e, "Section unavailable");
            &[]
        }
    }
}
