//! The `statquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    std::fs::create_dir_all("question-banks")?;
    let bank_path = std::path::Path::new("question-banks/bioestadistica.toml");
    if bank_path.exists() {
        println!("question-banks/bioestadistica.toml already exists, skipping.");
    } else {
        std::fs::write(bank_path, SAMPLE_BANK)?;
        println!("Created question-banks/bioestadistica.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: statquiz validate --bank question-banks");
    println!("  2. Run: statquiz quiz --bank question-banks");
    println!("  3. Run: statquiz progress");

    Ok(())
}

const SAMPLE_BANK: &str = r#"[bank]
id = "bioestadistica"
name = "Bioestadística"
description = "Preguntas introductorias de bioestadística"

[[questions]]
id = 1
topic = 1
title = "Media aritmética"
prompt = "Las edades de cinco pacientes son 20, 22, 24, 26 y 28 años. ¿Cuál es la media?"
options = ["22", "24", "25"]
correct_answer = "24"
explanation = "La media es la suma de los valores dividida entre el número de observaciones: 120 / 5 = 24."

[[questions]]
id = 2
topic = 1
title = "Mediana"
prompt = "Para el conjunto de datos 3, 5, 8, 12, 15, ¿cuál es la mediana?"
options = ["5", "8", "12"]
correct_answer = "8"
explanation = "Con los datos ordenados, la mediana es el valor central."

[[questions]]
id = 3
topic = 2
title = "Regla empírica"
prompt = "En una distribución normal, ¿qué porcentaje de los datos se encuentra a una desviación estándar de la media?"
options = ["68.27%", "95.45%", "99.73%"]
correct_answer = "68.27%"
explanation = "La regla empírica indica 68.27% dentro de una desviación, 95.45% dentro de dos y 99.73% dentro de tres."

[[questions]]
id = 4
topic = 2
title = "Tipo de variable"
prompt = "El grupo sanguíneo de un paciente (A, B, AB, O) es una variable:"
options = ["Cualitativa nominal", "Cualitativa ordinal", "Cuantitativa discreta"]
correct_answer = "Cualitativa nominal"
explanation = "Las categorías no tienen orden intrínseco, por lo que la variable es cualitativa nominal."

[[questions]]
id = 5
topic = 3
title = "Intervalo de confianza"
prompt = "¿Qué nivel de confianza se usa con mayor frecuencia al estimar una media poblacional?"
options = ["90%", "95%", "99%"]
correct_answer = "95%"
explanation = "Por convención, el intervalo de confianza del 95% es el más utilizado en estudios de salud."
"#;
