use std::collections::HashMap;
use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::service::BookService;
use crate::catalog::domain::CatalogService;
use crate::core::catalog::{CatalogError, CatalogResult, PersistOutcome};
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::gateway::events::EventPublisher;

pub struct CatalogServiceImpl {
    branch_id: String,
    book_service: Box<dyn BookService>,
    events_publisher: Box<dyn EventPublisher>,
}

impl CatalogServiceImpl {
    pub fn new(config: &Configuration, book_service: Box<dyn BookService>,
               events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            book_service,
            events_publisher,
        }
    }
}

// Title and ISBN must be present on both register and update.
fn validate_mandatory_fields(book: &BookDto) -> CatalogResult<()> {
    if book.title.is_empty() || book.isbn.is_empty() {
        return Err(CatalogError::mandatory_field_missing(
            "title and isbn are mandatory fields"));
    }
    Ok(())
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn register_book(&self, book: &BookDto) -> CatalogResult<PersistOutcome> {
        // check order is fixed: duplicate, mandatory fields, copies, persist
        if self.book_service.find_book_by_id(book.book_id).await?.is_some() {
            return Err(CatalogError::duplicate_identifier(
                format!("book {} is already registered", book.book_id).as_str()));
        }
        validate_mandatory_fields(book)?;
        if book.copies < 0 {
            return Err(CatalogError::negative_copies(
                format!("book {} cannot be registered with {} copies",
                        book.book_id, book.copies).as_str()));
        }
        match self.book_service.add_book(&BookEntity::from(book)).await {
            Ok(()) => {
                let _ = self.events_publisher.publish(&DomainEvent::added(
                    "books", self.branch_id.as_str(), book.book_id.to_string().as_str(),
                    &HashMap::new(), book)?).await?;
                Ok(PersistOutcome::Committed)
            }
            Err(err) => {
                tracing::warn!("failed to store book {}: {}", book.book_id, err);
                Ok(PersistOutcome::persistence_failed(err.to_string().as_str()))
            }
        }
    }

    async fn update_book(&self, book: &BookDto) -> CatalogResult<PersistOutcome> {
        if book.book_id <= 0 {
            return Err(CatalogError::invalid_argument(
                format!("invalid book id {}", book.book_id).as_str(),
                Some("400".to_string())));
        }
        let mut existing = match self.book_service.find_book_by_id(book.book_id).await? {
            Some(existing) => existing,
            None => {
                return Err(CatalogError::not_found(
                    format!("book {} does not exist", book.book_id).as_str()));
            }
        };
        validate_mandatory_fields(book)?;
        if book.copies < 0 {
            return Err(CatalogError::invalid_argument(
                format!("copies cannot be negative for book {}", book.book_id).as_str(),
                Some("400".to_string())));
        }
        // The incoming copy count is an increment to apply, not the new
        // absolute count; only the stored record's copies field is changed.
        existing.copies += book.copies;
        match self.book_service.update_book(&existing).await {
            Ok(()) => {
                let _ = self.events_publisher.publish(&DomainEvent::updated(
                    "books", self.branch_id.as_str(), existing.book_id.to_string().as_str(),
                    &HashMap::new(), &BookDto::from(&existing))?).await?;
                Ok(PersistOutcome::Committed)
            }
            Err(err) => {
                tracing::warn!("failed to update book {}: {}", book.book_id, err);
                Ok(PersistOutcome::persistence_failed(err.to_string().as_str()))
            }
        }
    }

    async fn remove_book(&self, book_id: i64) -> CatalogResult<PersistOutcome> {
        if self.book_service.find_book_by_id(book_id).await?.is_none() {
            return Err(CatalogError::not_found(
                format!("book {} does not exist", book_id).as_str()));
        }
        if self.book_service.has_active_loans(book_id).await? {
            return Err(CatalogError::active_loan_conflict(
                format!("book {} is currently on loan", book_id).as_str()));
        }
        match self.book_service.remove_book(book_id).await {
            Ok(()) => {
                let data = book_id.to_string();
                let _ = self.events_publisher.publish(&DomainEvent::deleted(
                    "books", self.branch_id.as_str(), data.as_str(),
                    &HashMap::new(), &data)?).await?;
                Ok(PersistOutcome::Committed)
            }
            Err(err) => {
                tracing::warn!("failed to remove book {}: {}", book_id, err);
                Ok(PersistOutcome::persistence_failed(err.to_string().as_str()))
            }
        }
    }

    async fn find_book_by_id(&self, book_id: i64) -> CatalogResult<BookDto> {
        match self.book_service.find_book_by_id(book_id).await? {
            Some(book) => Ok(BookDto::from(&book)),
            None => Err(CatalogError::not_found(
                format!("book {} does not exist", book_id).as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;
    use crate::books::domain::model::BookEntity;
    use crate::books::dto::BookDto;
    use crate::books::service::BookService;
    use crate::catalog::domain::CatalogService;
    use crate::catalog::domain::service::CatalogServiceImpl;
    use crate::core::catalog::{CatalogError, CatalogResult, PersistOutcome};
    use crate::core::domain::Configuration;
    use crate::gateway::logs::publisher::LogPublisher;

    // Recorder keeps shared handles on the collaborator calls so tests can
    // assert how often each persistence operation fired.
    #[derive(Clone, Default)]
    struct Recorder {
        add_calls: Arc<AtomicUsize>,
        update_calls: Arc<AtomicUsize>,
        delete_calls: Arc<AtomicUsize>,
        last_update: Arc<Mutex<Option<BookEntity>>>,
    }

    impl Recorder {
        fn add_calls(&self) -> usize {
            self.add_calls.load(Ordering::SeqCst)
        }
        fn update_calls(&self) -> usize {
            self.update_calls.load(Ordering::SeqCst)
        }
        fn delete_calls(&self) -> usize {
            self.delete_calls.load(Ordering::SeqCst)
        }
        fn last_update(&self) -> Option<BookEntity> {
            self.last_update.lock().expect("recorder lock").clone()
        }
    }

    struct RecordingBookService {
        stored: HashMap<i64, BookEntity>,
        loaned: HashSet<i64>,
        fail_persist: bool,
        recorder: Recorder,
    }

    #[async_trait]
    impl BookService for RecordingBookService {
        async fn find_book_by_id(&self, book_id: i64) -> CatalogResult<Option<BookEntity>> {
            Ok(self.stored.get(&book_id).cloned())
        }

        async fn add_book(&self, _book: &BookEntity) -> CatalogResult<()> {
            self.recorder.add_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_persist {
                return Err(CatalogError::persistence("store rejected add", None, false));
            }
            Ok(())
        }

        async fn update_book(&self, book: &BookEntity) -> CatalogResult<()> {
            self.recorder.update_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_persist {
                return Err(CatalogError::persistence("store rejected update", None, false));
            }
            *self.recorder.last_update.lock().expect("recorder lock") = Some(book.clone());
            Ok(())
        }

        async fn remove_book(&self, _book_id: i64) -> CatalogResult<()> {
            self.recorder.delete_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_persist {
                return Err(CatalogError::persistence("store rejected delete", None, false));
            }
            Ok(())
        }

        async fn has_active_loans(&self, book_id: i64) -> CatalogResult<bool> {
            Ok(self.loaned.contains(&book_id))
        }
    }

    fn build_sut(stored: Vec<BookEntity>, loaned: Vec<i64>,
                 fail_persist: bool) -> (CatalogServiceImpl, Recorder) {
        let recorder = Recorder::default();
        let book_service = RecordingBookService {
            stored: stored.into_iter().map(|b| (b.book_id, b)).collect(),
            loaned: loaned.into_iter().collect(),
            fail_persist,
            recorder: recorder.clone(),
        };
        let svc = CatalogServiceImpl::new(&Configuration::new("test"),
                                          Box::new(book_service),
                                          Box::new(LogPublisher::new()));
        (svc, recorder)
    }

    fn clean_code(book_id: i64, copies: i64) -> BookDto {
        BookDto::new(book_id, "Clean Code", "Robert C. Martin",
                     "9780132350884", "Programming", 2008, copies)
    }

    fn tdd_entity(book_id: i64, copies: i64) -> BookEntity {
        BookEntity::new(book_id, "Test Driven Development", "Kent Beck",
                        "9780321146533", "Programming", 2003, copies)
    }

    #[tokio::test]
    async fn test_should_register_book_with_valid_data() {
        let (svc, recorder) = build_sut(vec![], vec![], false);

        let outcome = svc.register_book(&clean_code(0, 3)).await.expect("should register book");

        assert_eq!(PersistOutcome::Committed, outcome);
        assert_eq!(1, recorder.add_calls());
    }

    #[tokio::test]
    async fn test_should_fail_registering_book_with_existing_id() {
        let (svc, recorder) = build_sut(vec![tdd_entity(1, 5)], vec![], false);

        let res = svc.register_book(&clean_code(1, 3)).await;

        assert!(matches!(res, Err(CatalogError::DuplicateIdentifier { message: _ })));
        assert_eq!(0, recorder.add_calls());
    }

    #[tokio::test]
    async fn test_should_fail_registering_book_with_empty_title() {
        let (svc, recorder) = build_sut(vec![], vec![], false);
        let mut book = clean_code(0, 3);
        book.title = "".to_string();

        let res = svc.register_book(&book).await;

        assert!(matches!(res, Err(CatalogError::MandatoryFieldMissing { message: _ })));
        assert_eq!(0, recorder.add_calls());
    }

    #[tokio::test]
    async fn test_should_fail_registering_book_with_empty_isbn() {
        let (svc, recorder) = build_sut(vec![], vec![], false);
        let mut book = clean_code(0, 3);
        book.isbn = "".to_string();

        let res = svc.register_book(&book).await;

        assert!(matches!(res, Err(CatalogError::MandatoryFieldMissing { message: _ })));
        assert_eq!(0, recorder.add_calls());
    }

    #[tokio::test]
    async fn test_should_fail_registering_book_with_negative_copies() {
        let (svc, recorder) = build_sut(vec![], vec![], false);

        let res = svc.register_book(&clean_code(0, -1)).await;

        assert!(matches!(res, Err(CatalogError::NegativeCopies { message: _ })));
        assert_eq!(0, recorder.add_calls());
    }

    #[tokio::test]
    async fn test_should_check_duplicate_before_mandatory_fields() {
        let (svc, recorder) = build_sut(vec![tdd_entity(1, 5)], vec![], false);
        let mut book = clean_code(1, -1);
        book.title = "".to_string();

        let res = svc.register_book(&book).await;

        assert!(matches!(res, Err(CatalogError::DuplicateIdentifier { message: _ })));
        assert_eq!(0, recorder.add_calls());
    }

    #[tokio::test]
    async fn test_should_check_mandatory_fields_before_copies() {
        let (svc, _) = build_sut(vec![], vec![], false);
        let mut book = clean_code(0, -1);
        book.isbn = "".to_string();

        let res = svc.register_book(&book).await;

        assert!(matches!(res, Err(CatalogError::MandatoryFieldMissing { message: _ })));
    }

    #[tokio::test]
    async fn test_should_report_persistence_failure_on_register() {
        let (svc, recorder) = build_sut(vec![], vec![], true);

        let outcome = svc.register_book(&clean_code(0, 3)).await.expect("should not propagate");

        assert!(matches!(outcome, PersistOutcome::PersistenceFailed { reason: _ }));
        assert_eq!(1, recorder.add_calls());
    }

    #[tokio::test]
    async fn test_should_update_book_with_valid_data() {
        let mut stored = tdd_entity(1, 5);
        stored.title = "Old Title".to_string();
        let (svc, recorder) = build_sut(vec![stored], vec![], false);

        let mut incoming = BookDto::from(&tdd_entity(1, 5));
        incoming.title = "New Title".to_string();
        let outcome = svc.update_book(&incoming).await.expect("should update book");

        assert_eq!(PersistOutcome::Committed, outcome);
        assert_eq!(1, recorder.update_calls());
        // only the copy count of the stored record is merged
        let persisted = recorder.last_update().expect("update call recorded");
        assert_eq!("Old Title", persisted.title.as_str());
        assert_eq!(10, persisted.copies);
    }

    #[tokio::test]
    async fn test_should_increment_copies_on_update() {
        let (svc, recorder) = build_sut(vec![tdd_entity(1, 5)], vec![], false);

        let outcome = svc.update_book(&BookDto::from(&tdd_entity(1, 2))).await
            .expect("should update book");

        assert_eq!(PersistOutcome::Committed, outcome);
        assert_eq!(1, recorder.update_calls());
        assert_eq!(7, recorder.last_update().expect("update call recorded").copies);
    }

    #[tokio::test]
    async fn test_should_fail_updating_book_with_invalid_id() {
        let (svc, recorder) = build_sut(vec![], vec![], false);

        let res = svc.update_book(&clean_code(0, 1)).await;

        assert!(matches!(res, Err(CatalogError::InvalidArgument { message: _, reason_code: _ })));
        assert_eq!(0, recorder.update_calls());
    }

    #[tokio::test]
    async fn test_should_fail_updating_missing_book() {
        let (svc, recorder) = build_sut(vec![], vec![], false);

        let res = svc.update_book(&clean_code(9, 1)).await;

        assert!(matches!(res, Err(CatalogError::NotFound { message: _ })));
        assert_eq!(0, recorder.update_calls());
    }

    #[tokio::test]
    async fn test_should_fail_updating_book_with_empty_title() {
        let (svc, recorder) = build_sut(vec![tdd_entity(1, 5)], vec![], false);
        let mut book = clean_code(1, 1);
        book.title = "".to_string();

        let res = svc.update_book(&book).await;

        assert!(matches!(res, Err(CatalogError::MandatoryFieldMissing { message: _ })));
        assert_eq!(0, recorder.update_calls());
    }

    #[tokio::test]
    async fn test_should_fail_updating_book_with_negative_copies() {
        let (svc, recorder) = build_sut(vec![tdd_entity(1, 5)], vec![], false);

        let res = svc.update_book(&clean_code(1, -2)).await;

        // a different kind than the registration-time NegativeCopies
        assert!(matches!(res, Err(CatalogError::InvalidArgument { message: _, reason_code: _ })));
        assert_eq!(0, recorder.update_calls());
    }

    #[tokio::test]
    async fn test_should_report_persistence_failure_on_update() {
        let (svc, recorder) = build_sut(vec![tdd_entity(1, 5)], vec![], true);

        let outcome = svc.update_book(&BookDto::from(&tdd_entity(1, 2))).await
            .expect("should not propagate");

        assert!(matches!(outcome, PersistOutcome::PersistenceFailed { reason: _ }));
        assert_eq!(1, recorder.update_calls());
    }

    #[tokio::test]
    async fn test_should_remove_book() {
        let (svc, recorder) = build_sut(vec![tdd_entity(1, 5)], vec![], false);

        let outcome = svc.remove_book(1).await.expect("should remove book");

        assert_eq!(PersistOutcome::Committed, outcome);
        assert_eq!(1, recorder.delete_calls());
    }

    #[tokio::test]
    async fn test_should_fail_removing_missing_book() {
        let (svc, recorder) = build_sut(vec![], vec![], false);

        let res = svc.remove_book(9).await;

        assert!(matches!(res, Err(CatalogError::NotFound { message: _ })));
        assert_eq!(0, recorder.delete_calls());
    }

    #[tokio::test]
    async fn test_should_fail_removing_loaned_book() {
        let (svc, recorder) = build_sut(vec![tdd_entity(1, 5)], vec![1], false);

        let res = svc.remove_book(1).await;

        assert!(matches!(res, Err(CatalogError::ActiveLoanConflict { message: _ })));
        assert_eq!(0, recorder.delete_calls());
    }

    #[tokio::test]
    async fn test_should_report_persistence_failure_on_remove() {
        let (svc, recorder) = build_sut(vec![tdd_entity(1, 5)], vec![], true);

        let outcome = svc.remove_book(1).await.expect("should not propagate");

        assert!(matches!(outcome, PersistOutcome::PersistenceFailed { reason: _ }));
        assert_eq!(1, recorder.delete_calls());
    }

    #[tokio::test]
    async fn test_should_find_book_by_id() {
        let (svc, _) = build_sut(vec![tdd_entity(1, 5)], vec![], false);

        let book = svc.find_book_by_id(1).await.expect("should return book");
        assert_eq!("Test Driven Development", book.title.as_str());

        let res = svc.find_book_by_id(2).await;
        assert!(matches!(res, Err(CatalogError::NotFound { message: _ })));
    }
}
