use crate::StoreOpts;
use anyhow::{anyhow, Context};
use seed_sink::{MongoOpts, MongoSink};

// Connect to the MongoDB collection the run works on
pub async fn connect_to_mongodb(
    store_opts: &StoreOpts,
    collection: &str,
) -> anyhow::Result<MongoSink> {
    let connection_string = store_opts
        .mongo_uri
        .clone()
        .ok_or_else(|| anyhow!("No MongoDB connection string: set MONGO_URI or pass --mongo-uri"))?;

    let opts = MongoOpts {
        connection_string,
        database: store_opts.database.clone(),
    };

    MongoSink::connect(&opts, collection)
        .await
        .context("Failed to connect to MongoDB")
}
