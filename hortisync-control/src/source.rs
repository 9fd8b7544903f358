use tokio::sync::watch;

use hortisync_api::models::SensorSnapshot;

use crate::error::SourceError;

/// Anything that can produce the next [`SensorSnapshot`].
///
/// The control rule only ever sees snapshots, so a simulated source and real
/// hardware are interchangeable behind this trait.
pub trait SensorSource {
    fn sample(&mut self, previous: &SensorSnapshot) -> Result<SensorSnapshot, SourceError>;

    fn name(&self) -> &'static str;
}

impl<S: SensorSource + ?Sized> SensorSource for Box<S> {
    fn sample(&mut self, previous: &SensorSnapshot) -> Result<SensorSnapshot, SourceError> {
        (**self).sample(previous)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Producer half of a [`LiveDeviceSource`]. Device drivers push readings here.
#[derive(Debug)]
pub struct LiveDeviceFeed {
    sender: watch::Sender<Option<SensorSnapshot>>,
}

impl LiveDeviceFeed {
    pub fn push(&self, snapshot: SensorSnapshot) -> Result<(), SourceError> {
        self.sender
            .send(Some(snapshot))
            .map_err(|_| SourceError::Disconnected)
    }
}

/// Serves whatever reading the device pushed last.
#[derive(Debug)]
pub struct LiveDeviceSource {
    receiver: watch::Receiver<Option<SensorSnapshot>>,
}

impl LiveDeviceSource {
    pub fn channel() -> (LiveDeviceFeed, LiveDeviceSource) {
        let (sender, receiver) = watch::channel(None);

        (LiveDeviceFeed { sender }, LiveDeviceSource { receiver })
    }
}

impl SensorSource for LiveDeviceSource {
    fn sample(&mut self, _previous: &SensorSnapshot) -> Result<SensorSnapshot, SourceError> {
        if self.receiver.has_changed().is_err() {
            return Err(SourceError::Disconnected);
        }

        self.receiver
            .borrow_and_update()
            .clone()
            .ok_or(SourceError::NoReading)
    }

    fn name(&self) -> &'static str {
        "live-device"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_source_before_first_reading() {
        let (_feed, mut source) = LiveDeviceSource::channel();

        assert_eq!(
            source.sample(&SensorSnapshot::default()),
            Err(SourceError::NoReading)
        );
    }

    #[test]
    fn test_live_source_returns_latest_reading() {
        let (feed, mut source) = LiveDeviceSource::channel();

        let first = SensorSnapshot {
            temperature: 19.0,
            ..SensorSnapshot::default()
        };
        let second = SensorSnapshot {
            temperature: 21.0,
            ..SensorSnapshot::default()
        };
        feed.push(first).unwrap();
        feed.push(second.clone()).unwrap();

        assert_eq!(source.sample(&SensorSnapshot::default()), Ok(second.clone()));
        // No new reading: the last one is served again.
        assert_eq!(source.sample(&SensorSnapshot::default()), Ok(second));
    }

    #[test]
    fn test_live_source_reports_dropped_feed() {
        let (feed, mut source) = LiveDeviceSource::channel();
        feed.push(SensorSnapshot::default()).unwrap();
        drop(feed);

        assert_eq!(
            source.sample(&SensorSnapshot::default()),
            Err(SourceError::Disconnected)
        );
    }

    #[test]
    fn test_feed_without_source_is_disconnected() {
        let (feed, source) = LiveDeviceSource::channel();
        drop(source);

        assert_eq!(feed.push(SensorSnapshot::default()), Err(SourceError::Disconnected));
    }
}
