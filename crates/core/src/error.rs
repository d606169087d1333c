use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::SettingsError;
use crate::selector::SelectionError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::SelectionSettings;
    use crate::selector::{flatten, sample};

    fn pick(per_category: u32) -> Result<usize, Error> {
        let catalog = Catalog::new(Catalog::builtin().categories().to_vec())?;
        let settings = SelectionSettings::new(vec!["NLP".into()], per_category.max(1), false)?;
        let records = flatten(&catalog, settings.categories());
        Ok(sample(&records, per_category, None)?.len())
    }

    #[test]
    fn layer_errors_convert_with_question_mark() {
        assert_eq!(pick(2).unwrap(), 2);
        assert!(matches!(
            pick(0),
            Err(Error::Selection(SelectionError::InvalidPerCategory))
        ));
    }
}
