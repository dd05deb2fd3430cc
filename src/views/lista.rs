//! Estado local de uma lista (tabela) com seleção múltipla

use std::collections::HashSet;

use goalmanager_api::types::Identificavel;

#[derive(Debug, Clone)]
pub struct ListState<T> {
    itens: Vec<T>,
    selecionados: HashSet<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            itens: Vec::new(),
            selecionados: HashSet::new(),
        }
    }
}

impl<T: Identificavel + Clone> ListState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_itens(itens: Vec<T>) -> Self {
        let mut lista = Self::new();
        lista.replace(itens);
        lista
    }

    pub fn itens(&self) -> &[T] {
        &self.itens
    }

    pub fn len(&self) -> usize {
        self.itens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itens.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.itens.iter().find(|i| i.id() == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.itens.iter_mut().find(|i| i.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Substitui todo o conteúdo; a seleção mantém apenas ids que continuam presentes
    pub fn replace(&mut self, itens: Vec<T>) {
        self.itens = itens;
        let ids: HashSet<&str> = self.itens.iter().map(|i| i.id()).collect();
        self.selecionados.retain(|id| ids.contains(id.as_str()));
    }

    /// Reconcilia com o registro do servidor (substitui pelo id ou adiciona ao fim)
    pub fn upsert(&mut self, item: T) {
        match self.itens.iter().position(|i| i.id() == item.id()) {
            Some(idx) => self.itens[idx] = item,
            None => self.itens.push(item),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.selecionados.remove(id);
        let idx = self.itens.iter().position(|i| i.id() == id)?;
        Some(self.itens.remove(idx))
    }

    /// Remove exatamente os ids informados; retorna quantos estavam na lista
    pub fn remove_many(&mut self, ids: &[String]) -> usize {
        let alvo: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let antes = self.itens.len();
        self.itens.retain(|i| !alvo.contains(i.id()));
        self.selecionados.retain(|id| !alvo.contains(id.as_str()));
        antes - self.itens.len()
    }

    // ==================== SELEÇÃO ====================

    /// Alterna a seleção de um item; ids fora da lista são ignorados
    pub fn toggle_selecao(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        if !self.selecionados.remove(id) {
            self.selecionados.insert(id.to_string());
        }
        true
    }

    /// Tudo selecionado → limpa; caso contrário seleciona tudo
    pub fn toggle_todos(&mut self) {
        if self.todos_selecionados() {
            self.selecionados.clear();
        } else {
            self.selecionados = self.itens.iter().map(|i| i.id().to_string()).collect();
        }
    }

    pub fn todos_selecionados(&self) -> bool {
        !self.itens.is_empty() && self.selecionados.len() == self.itens.len()
    }

    pub fn esta_selecionado(&self, id: &str) -> bool {
        self.selecionados.contains(id)
    }

    /// Ids selecionados, na ordem da lista
    pub fn selecionados(&self) -> Vec<String> {
        self.itens
            .iter()
            .filter(|i| self.selecionados.contains(i.id()))
            .map(|i| i.id().to_string())
            .collect()
    }

    pub fn limpar_selecao(&mut self) {
        self.selecionados.clear();
    }
}
