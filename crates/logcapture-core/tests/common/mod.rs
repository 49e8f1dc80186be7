use logcapture_core::{ContextMap, Event, Level, NoContext, Registry};

/// Registry that ignores the thread's MDC, for deterministic comparisons
#[allow(dead_code)]
pub fn isolated_registry() -> Registry {
    Registry::builder().context_provider(NoContext).build()
}

/// Registry whose loggers snapshot a fixed context map
#[allow(dead_code)]
pub fn registry_with_context(pairs: &[(&str, &str)]) -> Registry {
    let context: ContextMap = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Registry::builder()
        .context_provider(move || context.clone())
        .build()
}

/// Levels of the given events, in order
#[allow(dead_code)]
pub fn levels(events: &[Event]) -> Vec<Level> {
    events.iter().map(Event::level).collect()
}

/// Templates of the given events, in order
#[allow(dead_code)]
pub fn templates(events: &[Event]) -> Vec<String> {
    events.iter().map(|e| e.message().to_string()).collect()
}
