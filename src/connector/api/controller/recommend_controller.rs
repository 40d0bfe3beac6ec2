use crate::domain::{DomainError, RecommendRequest, Recommendation};

use super::super::Container;

pub struct RecommendController<'a> {
    container: &'a Container,
}

impl<'a> RecommendController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn recommend(&self, request: RecommendRequest) -> Result<Recommendation, DomainError> {
        self.container.recommend_use_case().execute(request).await
    }
}
