use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One form submission, keyed by the labels the form export uses.
#[derive(Debug, Clone, Serialize)]
struct Submission {
    #[serde(rename = "Nome")]
    name: String,
    #[serde(rename = "Qual categoria deseja cadrastar")]
    category: String,
    #[serde(rename = "Qual o gênero da sua solicitação")]
    gender: String,
    #[serde(rename = "Qual indicação você deseja fazer?")]
    indication: String,
    #[serde(rename = "Insira o Link da sua indicação")]
    link: Option<String>,
}

const LABELS: [&str; 5] = [
    "Nome",
    "Qual categoria deseja cadrastar",
    "Qual o gênero da sua solicitação",
    "Qual indicação você deseja fazer?",
    "Insira o Link da sua indicação",
];

const NAMES: [&str; 6] = ["Ana", "Bruno", "Carla", "Diego", "Elisa", "Fábio"];

/// Category → (gender, title) pool.
const CATALOGUE: [(&str, &[(&str, &str)]); 4] = [
    (
        "Filme",
        &[
            ("Drama", "Central do Brasil"),
            ("Ação", "Tropa de Elite"),
            ("Comédia", "O Auto da Compadecida"),
            ("Drama", "Cidade de Deus"),
        ],
    ),
    (
        "Série",
        &[
            ("Suspense", "Dark"),
            ("Comédia", "The Office"),
            ("Drama", "Sintonia"),
        ],
    ),
    (
        "Livro",
        &[
            ("Romance", "Dom Casmurro"),
            ("Ficção", "Ensaio sobre a Cegueira"),
            ("Romance", "Capitães da Areia"),
        ],
    ),
    (
        "Jogo",
        &[("RPG", "The Witcher 3"), ("Ação", "God of War")],
    ),
];

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

fn generate(count: usize, rng: &mut SimpleRng) -> Vec<Submission> {
    (0..count)
        .map(|_| {
            let (category, pool) = CATALOGUE[rng.below(CATALOGUE.len())];
            let (gender, title) = pool[rng.below(pool.len())];
            // roughly a third of submissions come without a link
            let link = (rng.below(3) != 0).then(|| {
                format!(
                    "https://example.org/{}",
                    title.to_lowercase().replace(' ', "-")
                )
            });
            Submission {
                name: NAMES[rng.below(NAMES.len())].to_string(),
                category: category.to_string(),
                gender: gender.to_string(),
                indication: title.to_string(),
                link,
            }
        })
        .collect()
}

fn write_parquet(path: &str, rows: &[Submission]) -> Result<()> {
    let schema = Arc::new(Schema::new(
        LABELS
            .iter()
            .map(|label| Field::new(*label, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let column = |f: fn(&Submission) -> Option<&str>| {
        StringArray::from(rows.iter().map(f).collect::<Vec<_>>())
    };
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(column(|s| Some(s.name.as_str()))),
            Arc::new(column(|s| Some(s.category.as_str()))),
            Arc::new(column(|s| Some(s.gender.as_str()))),
            Arc::new(column(|s| Some(s.indication.as_str()))),
            Arc::new(column(|s| s.link.as_deref())),
        ],
    )
    .context("building record batch")?;

    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

/// Header labels are padded with spaces, the way the form export leaves them.
fn write_csv(path: &str, rows: &[Submission]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {path}"))?;
    writer
        .write_record(LABELS.iter().map(|l| format!(" {l} ")))
        .context("writing CSV header")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_json(path: &str, rows: &[Submission]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, rows).context("writing JSON")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(60, &mut rng);

    write_parquet("sample_data.parquet", &rows)?;
    write_csv("sample_data.csv", &rows)?;
    write_json("sample_data.json", &rows)?;

    println!(
        "Wrote {} submissions to sample_data.parquet, sample_data.csv and sample_data.json",
        rows.len()
    );
    Ok(())
}
