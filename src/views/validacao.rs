//! Validação dos formulários antes do envio

use goalmanager_api::types::{
    AtualizacaoHabito, AtualizacaoObjetivo, AtualizacaoTarefa, NovaTarefa, NovoHabito,
    NovoObjetivo, StatusTarefa, PROGRESSO_CONCLUIDA,
};

use crate::utils::logging::log_validation_error;
use crate::utils::{AppError, AppResult};

fn titulo_obrigatorio(titulo: &mut String) -> AppResult<()> {
    let limpo = titulo.trim();
    if limpo.is_empty() {
        log_validation_error("titulo", "vazio");
        return Err(AppError::validation("Título é obrigatório"));
    }
    *titulo = limpo.to_string();
    Ok(())
}

fn titulo_opcional(titulo: &mut Option<String>) -> AppResult<()> {
    match titulo {
        Some(t) => titulo_obrigatorio(t),
        None => Ok(()),
    }
}

fn sem_alteracoes() -> AppError {
    AppError::validation("Nenhum campo para atualizar")
}

pub fn validar_novo_objetivo(objetivo: &mut NovoObjetivo) -> AppResult<()> {
    titulo_obrigatorio(&mut objetivo.titulo)
}

pub fn validar_atualizacao_objetivo(atualizacao: &mut AtualizacaoObjetivo) -> AppResult<()> {
    if atualizacao.is_empty() {
        return Err(sem_alteracoes());
    }
    titulo_opcional(&mut atualizacao.titulo)
}

pub fn validar_novo_habito(habito: &mut NovoHabito) -> AppResult<()> {
    titulo_obrigatorio(&mut habito.titulo)?;
    if habito.objetivo_id.trim().is_empty() {
        log_validation_error("objetivoId", "vazio");
        return Err(AppError::validation("Objetivo é obrigatório"));
    }
    if habito.alvo_por_periodo == 0 {
        return Err(AppError::validation("Alvo por período deve ser maior que zero"));
    }
    Ok(())
}

pub fn validar_atualizacao_habito(atualizacao: &mut AtualizacaoHabito) -> AppResult<()> {
    if atualizacao.is_empty() {
        return Err(sem_alteracoes());
    }
    if atualizacao.alvo_por_periodo == Some(0) {
        return Err(AppError::validation("Alvo por período deve ser maior que zero"));
    }
    titulo_opcional(&mut atualizacao.titulo)
}

/// Tarefa concluída é enviada com progresso 100
pub fn validar_nova_tarefa(tarefa: &mut NovaTarefa) -> AppResult<()> {
    titulo_obrigatorio(&mut tarefa.titulo)?;
    if tarefa.habito_id.trim().is_empty() {
        log_validation_error("habitoId", "vazio");
        return Err(AppError::validation("Hábito é obrigatório"));
    }
    if tarefa.status == StatusTarefa::Concluida {
        tarefa.progresso = PROGRESSO_CONCLUIDA;
    }
    Ok(())
}

pub fn validar_atualizacao_tarefa(atualizacao: &mut AtualizacaoTarefa) -> AppResult<()> {
    if atualizacao.is_empty() {
        return Err(sem_alteracoes());
    }
    titulo_opcional(&mut atualizacao.titulo)?;
    if matches!(&atualizacao.habito_id, Some(h) if h.trim().is_empty()) {
        return Err(AppError::validation("Hábito é obrigatório"));
    }
    if atualizacao.status == Some(StatusTarefa::Concluida) {
        atualizacao.progresso = Some(PROGRESSO_CONCLUIDA);
    }
    Ok(())
}
