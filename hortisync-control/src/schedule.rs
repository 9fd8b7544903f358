use std::collections::BTreeSet;

use uuid::Uuid;

use hortisync_api::models::{IrrigationSchedule, ScheduleDraft, ScheduleUpdate, Weekday};

use crate::error::ScheduleError;

fn validate(name: &str, days: &BTreeSet<Weekday>, duration: u32) -> Result<(), ScheduleError> {
    if name.trim().is_empty() {
        return Err(ScheduleError::EmptyName);
    }
    if days.is_empty() {
        return Err(ScheduleError::NoDays);
    }
    if duration == 0 {
        return Err(ScheduleError::ZeroDuration);
    }

    Ok(())
}

fn issue(draft: ScheduleDraft) -> IrrigationSchedule {
    let ScheduleDraft { name, start_time, duration, days, active } = draft;

    IrrigationSchedule {
        id: Uuid::new_v4(),
        name: name.trim().to_string(),
        start_time,
        duration,
        days,
        active,
    }
}

/// User-managed irrigation schedules, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ScheduleBook {
    schedules: Vec<IrrigationSchedule>,
}

impl ScheduleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        Self {
            schedules: ScheduleDraft::defaults().into_iter().map(issue).collect(),
        }
    }

    pub fn add(&mut self, draft: ScheduleDraft) -> Result<&IrrigationSchedule, ScheduleError> {
        validate(&draft.name, &draft.days, draft.duration)?;

        let schedule = issue(draft);

        tracing::debug!("add schedule {} ({})", schedule.name, schedule.id);

        self.schedules.push(schedule);
        Ok(&self.schedules[self.schedules.len() - 1])
    }

    pub fn update(&mut self, id: Uuid, update: ScheduleUpdate) -> Result<&IrrigationSchedule, ScheduleError> {
        let index = self.position(id)?;
        let current = &self.schedules[index];

        let name = update
            .name
            .map(|name| name.trim().to_string())
            .unwrap_or_else(|| current.name.clone());
        let days = update.days.unwrap_or_else(|| current.days.clone());
        let duration = update.duration.unwrap_or(current.duration);

        validate(&name, &days, duration)?;

        let schedule = &mut self.schedules[index];
        schedule.name = name;
        schedule.days = days;
        schedule.duration = duration;
        if let Some(start_time) = update.start_time {
            schedule.start_time = start_time;
        }
        if let Some(active) = update.active {
            schedule.active = active;
        }

        tracing::debug!("update schedule {}", id);

        Ok(schedule)
    }

    pub fn set_active(&mut self, id: Uuid, active: bool) -> Result<(), ScheduleError> {
        let index = self.position(id)?;
        self.schedules[index].active = active;
        Ok(())
    }

    pub fn delete(&mut self, id: Uuid) -> Result<IrrigationSchedule, ScheduleError> {
        let index = self.position(id)?;

        tracing::debug!("delete schedule {}", id);

        Ok(self.schedules.remove(index))
    }

    pub fn get(&self, id: Uuid) -> Option<&IrrigationSchedule> {
        self.schedules.iter().find(|schedule| schedule.id == id)
    }

    pub fn list(&self) -> &[IrrigationSchedule] {
        &self.schedules
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    fn position(&self, id: Uuid) -> Result<usize, ScheduleError> {
        self.schedules
            .iter()
            .position(|schedule| schedule.id == id)
            .ok_or(ScheduleError::NotFound(id))
    }
}
