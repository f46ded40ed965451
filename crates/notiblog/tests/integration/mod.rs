mod failures;
mod outline;
mod posts;
mod tags;
