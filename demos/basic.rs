use tf_idf_corpus::TfIdf;
use tracing_subscriber::EnvFilter;

fn main() -> tf_idf_corpus::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // add documents (already tokenized)
    let mut tfidf: TfIdf = TfIdf::new();
    tfidf.add_document("Article1".to_string(), &["i", "love", "cats"]);
    tfidf.add_document("Article2".to_string(), &["i", "love", "cake"]);
    tfidf.add_document("Article3".to_string(), &["cats", "love", "cake"]);

    let hits = tfidf.score_document(&["you", "love", "cats", "and", "cake"]);
    println!("Scores:\n{}", hits);

    // grow classes incrementally, recompute only when scoring
    let mut classes: TfIdf = TfIdf::new();
    classes.set_compute_on_add(false);
    classes.add_document("Cats".to_string(), &["i", "love", "cats"]);
    classes.add_document("Cake".to_string(), &["i", "love", "cake"]);
    classes.add_document("Cats".to_string(), &["cats", "are", "cute"]);
    classes.add_document("Cake".to_string(), &["cake", "is", "sweet"]);
    classes.add_document("Other".to_string(), &["i", "have", "many", "books"]);

    let hits = classes.score_document(&["i", "have", "many", "books"]);
    println!("Classes:\n{:#?}", hits);

    // snapshot round trip
    let path = std::env::temp_dir().join("tf-idf-corpus-demo").join("classes.cbor");
    classes.export(&path)?;
    let mut restored: TfIdf = TfIdf::from_snapshot(&path)?;
    println!("Restored:\n{}", restored.score_document(&["cats"]));
    Ok(())
}
