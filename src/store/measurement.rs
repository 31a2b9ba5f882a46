//! Measurement slice: types, rows and the joined view

use std::sync::Arc;

use super::keyed::{SliceError, Store, StoreConfig};
use crate::client::models::{MeasurementRow, MeasurementType};
use crate::client::{AcademicApi, MeasurementParams};
use crate::data::measurement::{JoinedMeasurements, join_measurements};
use crate::error::Result;

pub struct MeasurementSlice<C> {
    client: Arc<C>,
    error: Arc<SliceError>,
    pub types: Store<(), Vec<MeasurementType>>,
    pub rows: Store<MeasurementParams, Vec<MeasurementRow>>,
}

impl<C: AcademicApi + 'static> MeasurementSlice<C> {
    pub fn new(client: Arc<C>, config: &StoreConfig) -> Self {
        let error = Arc::new(SliceError::default());
        Self {
            client,
            types: Store::new("measurement types", error.clone(), config.clone()),
            rows: Store::new("measurements", error.clone(), config.clone()),
            error,
        }
    }

    pub async fn fetch_types(&self, force_refresh: bool) -> Result<Arc<Vec<MeasurementType>>> {
        let client = Arc::clone(&self.client);
        self.types
            .fetch((), force_refresh, move |()| async move {
                client.list_measurement_types(force_refresh).await
            })
            .await
    }

    pub async fn fetch_measurements(
        &self,
        params: MeasurementParams,
        force_refresh: bool,
    ) -> Result<Arc<Vec<MeasurementRow>>> {
        let client = Arc::clone(&self.client);
        self.rows
            .fetch(params, force_refresh, move |p| async move {
                client.list_measurements(&p, force_refresh).await
            })
            .await
    }

    /// Fetch types and rows together and join them
    pub async fn fetch_all_measurements(
        &self,
        params: MeasurementParams,
        force_refresh: bool,
    ) -> Result<JoinedMeasurements> {
        let (types, rows) = futures::try_join!(
            self.fetch_types(force_refresh),
            self.fetch_measurements(params, force_refresh)
        )?;
        Ok(join_measurements(&rows, &types))
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockEducationClient;
    use crate::client::fixtures::{measurement, measurement_type};

    #[tokio::test]
    async fn test_fetch_all_measurements_joins_and_counts_dropped() {
        let mock = Arc::new(
            MockEducationClient::new()
                .with_measurement_types(vec![measurement_type(1, "Free/reduced lunch (%)", "Demographics")])
                .with_measurements(vec![
                    measurement(10, 1, 5, 2024, 12.5),
                    measurement(11, 42, 5, 2024, 1.0),
                    measurement(12, 1, 6, 2024, 30.0),
                ]),
        );
        let slice = MeasurementSlice::new(mock.clone(), &StoreConfig::default());

        let joined = slice
            .fetch_all_measurements(MeasurementParams::district(5), false)
            .await
            .unwrap();

        assert_eq!(joined.measurements.len(), 1);
        assert_eq!(joined.dropped, 1);
        assert_eq!(joined.measurements[0].category, "Demographics");

        let _ = slice
            .fetch_all_measurements(MeasurementParams::district(5), false)
            .await
            .unwrap();
        let counts = mock.call_counts().await;
        assert_eq!(counts.list_measurement_types, 1);
        assert_eq!(counts.list_measurements, 1);
    }
}
