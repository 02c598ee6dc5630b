
#[cfg(test)]
mod system_status_tests;

#[cfg(test)]
mod property_summary_tests;


#[cfg(test)]
mod record_roundtrip_tests;

#[cfg(test)]
mod sync_plan_tests;
